//! Core of `ninemarket`: Nine Chronicles market and IAP prices in fiat.
//!
//! This crate contains:
//! - Currency, money, listing and IAP catalog models
//! - Pure pricing functions (conversion, per-unit IAP price, comparison)
//! - Formatting and sorting helpers for display
//! - HTTP transport, upstream API source, and the dashboard service
//! - Configuration, view context, and preference persistence

pub mod cache;
pub mod config;
pub mod context;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod http_client;
pub mod pricing;
pub mod service;
pub mod sort;
pub mod source;
pub mod throttling;

pub use cache::PriceCache;
pub use config::AppConfig;
pub use context::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ViewContext, CURRENCY_KEY,
    NETWORK_KEY,
};
pub use domain::{
    flatten_products, Category, Currency, CurrencyTicker, FavItem, FungibleItem, IapProduct,
    ItemProduct, ItemSubType, MarketItemProductsResponse, Money, Network, NetworkPrice,
    ProductType, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{ConfigError, ConversionError, PreferenceError, ValidationError};
pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use pricing::{
    average_price, average_price_stats, compare, token_equivalent, AveragePrice,
    CurrencyConverter, ExchangeRates, PriceComparison,
};
pub use service::{AverageView, IapBoard, ListingView, MarketBoard, MarketService};
pub use sort::SortKey;
pub use source::{MarketSource, NineChroniclesApi, SourceError, SourceErrorKind};
pub use throttling::RequestThrottle;
