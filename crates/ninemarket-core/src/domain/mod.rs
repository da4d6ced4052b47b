mod currency;
mod iap;
mod market;
mod money;
mod network;
mod timestamp;

pub use currency::{Currency, CurrencyTicker};
pub use iap::{
    flatten_products, Category, FavItem, FungibleItem, IapProduct, NetworkPrice, ProductType,
};
pub use market::{ItemProduct, ItemSubType, MarketItemProductsResponse};
pub use money::Money;
pub use network::Network;
pub use timestamp::UtcDateTime;

#[cfg(test)]
pub(crate) mod fixtures {
    pub(crate) use super::iap::tests::product;
    pub(crate) use super::market::tests::listing;
}
