use serde::{Deserialize, Serialize};

use crate::pricing::CurrencyConverter;
use crate::{ConversionError, CurrencyTicker, IapProduct, Money};

pub const AP_POTION: u32 = 500000;
pub const HOURGLASS: u32 = 400000;
pub const GOLDEN_DUST: u32 = 600201;

/// Items whose per-unit IAP price is tracked by default.
pub const DEFAULT_TRACKED_ITEMS: [u32; 3] = [AP_POTION, HOURGLASS, GOLDEN_DUST];

/// Per-unit fiat price of one item, taken from its IAP catalog listing.
///
/// The name is historical: the value comes from the single largest eligible
/// bundle, not from a mean over listings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragePrice {
    pub average_price: Money,
    pub amount: u64,
    pub sheet_id: u32,
}

fn unit_count(product: &IapProduct, sheet_id: u32) -> Option<u64> {
    let reward = product.single_reward()?;
    if reward.sheet_item_id != sheet_id || reward.amount == 0 {
        return None;
    }
    product.base_price()?;
    Some(reward.amount)
}

/// Per-unit price of `sheet_id` in `target`, from the largest bundle that
/// sells only that item. `Ok(None)` when no product qualifies.
pub fn average_price(
    products: &[IapProduct],
    sheet_id: u32,
    target: CurrencyTicker,
    converter: &CurrencyConverter,
) -> Result<Option<AveragePrice>, ConversionError> {
    let mut eligible: Vec<(u64, &IapProduct)> = products
        .iter()
        .filter_map(|product| unit_count(product, sheet_id).map(|count| (count, product)))
        .collect();
    // Stable: equal counts keep catalog order, so the later one is picked.
    eligible.sort_by_key(|(count, _)| *count);

    let Some((amount, product)) = eligible.last() else {
        return Ok(None);
    };
    let Some(base_price) = product.base_price() else {
        return Ok(None);
    };

    let converted = converter.convert(&Money::new(base_price, converter.base()), target)?;
    Ok(Some(AveragePrice {
        average_price: Money::from_currency(converted.decimal / *amount as f64, converted.currency),
        amount: *amount,
        sheet_id,
    }))
}

/// [`average_price`] for each tracked item, skipping items with no result.
pub fn average_price_stats(
    products: &[IapProduct],
    tracked_items: &[u32],
    target: CurrencyTicker,
    converter: &CurrencyConverter,
) -> Result<Vec<AveragePrice>, ConversionError> {
    let mut stats = Vec::with_capacity(tracked_items.len());
    for sheet_id in tracked_items {
        if let Some(average) = average_price(products, *sheet_id, target, converter)? {
            stats.push(average);
        }
    }
    Ok(stats)
}

/// Game tokens worth the same as `average` at `token_price`.
pub fn token_equivalent(average: &Money, token_price: Option<&Money>) -> Option<f64> {
    let token_price = token_price?;
    if token_price.ticker() != average.ticker()
        || !token_price.is_valid_amount()
        || !average.is_valid_amount()
        || token_price.decimal == 0.0
    {
        return None;
    }
    Some(average.decimal / token_price.decimal)
}
