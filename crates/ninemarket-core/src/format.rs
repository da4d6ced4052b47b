//! Display strings. Kept apart from the numeric pricing results.

use crate::pricing::{CurrencyConverter, PriceComparison};
use crate::{Currency, CurrencyTicker, IapProduct, Money, Network, ProductType};

const ADDRESS_SHORT_LENGTH: usize = 6;

/// Fixed decimals for `ticker`, no symbol.
pub fn format_amount(amount: f64, ticker: CurrencyTicker) -> String {
    let decimals = usize::from(Currency::of(ticker).decimal_places);
    format!("{amount:.decimals$}")
}

/// `"$1.5000 USD"`
pub fn format_money(money: &Money) -> String {
    format!(
        "{}{} {}",
        money.currency.symbol,
        format_amount(money.decimal, money.ticker()),
        money.ticker()
    )
}

/// Fiat value of a token-denominated listing price alongside the raw amount.
pub fn format_listing_price(token_amount: f64, token_price: &Money) -> String {
    format!(
        "{:.2} {} ({} NCG)",
        token_amount * token_price.decimal,
        token_price.ticker(),
        token_amount
    )
}

/// Catalog label: KRW store price first, then mileage, then free.
pub fn format_iap_price(product: &IapProduct) -> String {
    if let Some(krw) = product
        .network_price
        .map(|price| price.krw)
        .filter(|krw| *krw != 0.0)
    {
        return format!("{} KRW", group_thousands(krw));
    }
    if product.product_type == ProductType::Mileage {
        if let Some(mileage_price) = product.mileage_price {
            return format!("{mileage_price} Mileage");
        }
    }
    if product.mileage != 0 {
        return format!("{} Mileage", product.mileage);
    }
    if product.product_type == ProductType::Free {
        return String::from("FREE");
    }
    String::from("Unknown USD")
}

/// Store price label in the viewer's currency.
///
/// Sheets only list KRW and sometimes USD; other currencies are estimated
/// from the KRW price and marked as such.
pub fn format_iap_price_in(
    product: &IapProduct,
    currency: CurrencyTicker,
    converter: &CurrencyConverter,
) -> String {
    match product.product_type {
        ProductType::Mileage => {
            let mileage = product.mileage_price.unwrap_or(product.mileage);
            return format!("{mileage} Mileage");
        }
        ProductType::Free => return String::from("FREE"),
        ProductType::Iap | ProductType::Other => {}
    }

    let Some(network_price) = product.network_price else {
        return String::from("Unknown Price");
    };
    if let Some(listed) = network_price.listed(currency) {
        return format!("{} {currency}", format_amount(listed, currency));
    }

    match guess_from_krw(network_price.krw, currency, converter) {
        Some(guessed) => format!(
            "(Guessed from KRW) {} {currency}",
            format_amount(guessed, currency)
        ),
        None => String::from("Unknown Price"),
    }
}

/// `krw / rate[KRW] * rate[target]`: KRW back to the base, then into `target`.
/// Intentionally differs from the older `krw / rate[target]` estimate, which
/// treated KRW as the base currency.
fn guess_from_krw(krw: f64, target: CurrencyTicker, converter: &CurrencyConverter) -> Option<f64> {
    let krw_rate = converter.rate(CurrencyTicker::Krw).ok()?;
    let target_rate = converter.rate(target).ok()?;
    if krw_rate == 0.0 {
        return None;
    }
    Some(krw / krw_rate * target_rate)
}

/// `"25.00% cheaper than IAP"`
pub fn format_comparison(comparison: &PriceComparison) -> String {
    let direction = if comparison.cheaper {
        "cheaper"
    } else {
        "expensive"
    };
    format!("{:.2}% {direction} than IAP", comparison.percent)
}

/// Human name for a fungible item sheet id.
pub fn item_display_name(sheet_id: u32) -> Option<&'static str> {
    let name = match sheet_id {
        400000 => "Hourglass",
        500000 => "AP Potion",
        600201 => "Golden Dust",
        600202 => "Ruby Dust",
        600203 => "Emerald Dust",
        800201 => "Silver Dust",
        800202 => "Golden Meat",
        600401 => "Scroll",
        600402 => "Circle",
        _ => return None,
    };
    Some(name)
}

pub fn short_address(address: &str) -> String {
    let prefix: String = address.chars().take(ADDRESS_SHORT_LENGTH).collect();
    format!("0x{prefix}")
}

pub fn explorer_url(network: Network, address: &str) -> String {
    format!("{}/address/0x{address}", network.explorer_base_url())
}

fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
