use serde::{Deserialize, Serialize};

use crate::CurrencyTicker;

/// How an IAP product is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    /// Bought with real money.
    Iap,
    Mileage,
    Free,
    #[serde(other)]
    Other,
}

/// A reward item bundled in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleItem {
    pub sheet_item_id: u32,
    pub fungible_item_id: String,
    pub amount: u64,
}

/// A fungible asset value (currency-like) reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavItem {
    pub ticker: String,
    pub amount: f64,
}

/// Store price attached from the per-network price sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkPrice {
    #[serde(rename = "KRW")]
    pub krw: f64,
    #[serde(rename = "USD", default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,
}

impl NetworkPrice {
    /// Price listed directly in `ticker`, if the sheet carries one.
    pub fn listed(&self, ticker: CurrencyTicker) -> Option<f64> {
        match ticker {
            CurrencyTicker::Krw => Some(self.krw),
            CurrencyTicker::Usd => self.usd,
            _ => None,
        }
    }
}

/// IAP catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IapProduct {
    pub name: String,
    pub order: i64,
    #[serde(default)]
    pub google_sku: String,
    #[serde(default)]
    pub apple_sku: String,
    pub product_type: ProductType,
    pub daily_limit: Option<u32>,
    pub weekly_limit: Option<u32>,
    pub account_limit: Option<u32>,
    pub active: bool,
    pub buyable: bool,
    pub required_level: Option<u32>,
    #[serde(default)]
    pub mileage: u64,
    pub mileage_price: Option<u64>,
    #[serde(default)]
    pub purchase_count: u32,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub l10n_key: String,
    #[serde(default)]
    pub path: String,
    pub open_timestamp: Option<String>,
    pub close_timestamp: Option<String>,
    #[serde(default)]
    pub fav_list: Vec<FavItem>,
    #[serde(default)]
    pub fungible_item_list: Vec<FungibleItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_price: Option<NetworkPrice>,
}

impl IapProduct {
    /// USD store price, when known and positive.
    pub fn base_price(&self) -> Option<f64> {
        self.network_price
            .and_then(|price| price.usd)
            .filter(|usd| *usd > 0.0)
    }

    /// The only reward kind, if the product bundles exactly one.
    pub fn single_reward(&self) -> Option<&FungibleItem> {
        match self.fungible_item_list.as_slice() {
            [item] => Some(item),
            _ => None,
        }
    }
}

/// Catalog category as returned by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub order: i64,
    pub active: bool,
    #[serde(default)]
    pub l10n_key: String,
    #[serde(default)]
    pub path: String,
    pub product_list: Vec<IapProduct>,
}

/// Every product of every category, in catalog order.
pub fn flatten_products(categories: &[Category]) -> Vec<IapProduct> {
    categories
        .iter()
        .flat_map(|category| category.product_list.iter().cloned())
        .collect()
}
