//! Dashboard views over a [`MarketSource`].
//!
//! Upstream failures never reach the caller from here: they are logged and
//! replaced by an empty result, so the pricing functions simply see nothing
//! eligible. Conversion errors are configuration problems and do propagate.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::cache::PriceCache;
use crate::context::ViewContext;
use crate::format::item_display_name;
use crate::pricing::{
    average_price_stats, compare, token_equivalent, AveragePrice, CurrencyConverter,
    PriceComparison, DEFAULT_TRACKED_ITEMS,
};
use crate::sort::SortKey;
use crate::source::MarketSource;
use crate::{
    flatten_products, Category, ConversionError, CurrencyTicker, ItemProduct, ItemSubType,
    MarketItemProductsResponse, Money, Network,
};

/// One market listing priced for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub listing: ItemProduct,
    pub item_name: Option<&'static str>,
    pub unit_price: Option<Money>,
    pub total_price: Option<Money>,
    pub comparison: Option<PriceComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketBoard {
    pub context: ViewContext,
    pub sub_type: ItemSubType,
    pub sort: SortKey,
    pub total_count: u64,
    pub token_price: Option<Money>,
    pub listings: Vec<ListingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageView {
    #[serde(flatten)]
    pub average: AveragePrice,
    pub item_name: Option<&'static str>,
    pub token_equivalent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IapBoard {
    pub context: ViewContext,
    pub token_price: Option<Money>,
    pub averages: Vec<AverageView>,
    pub categories: Vec<Category>,
}

#[derive(Clone)]
pub struct MarketService {
    source: Arc<dyn MarketSource>,
    converter: CurrencyConverter,
    cache: PriceCache,
    tracked_items: Vec<u32>,
}

impl MarketService {
    pub fn new(source: Arc<dyn MarketSource>, converter: CurrencyConverter, cache: PriceCache) -> Self {
        Self {
            source,
            converter,
            cache,
            tracked_items: DEFAULT_TRACKED_ITEMS.to_vec(),
        }
    }

    pub fn with_tracked_items(mut self, tracked_items: Vec<u32>) -> Self {
        self.tracked_items = tracked_items;
        self
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub async fn item_products(
        &self,
        network: Network,
        sub_type: ItemSubType,
        offset: u64,
        limit: u64,
    ) -> MarketItemProductsResponse {
        match self
            .source
            .item_products(network, sub_type, offset, limit)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(%network, %sub_type, error = %err, "failed to fetch market listings");
                MarketItemProductsResponse::empty(offset, limit)
            }
        }
    }

    pub async fn categories(&self, network: Network) -> Vec<Category> {
        match self.source.categories(network).await {
            Ok(categories) => categories,
            Err(err) => {
                error!(%network, error = %err, "failed to fetch IAP catalog");
                Vec::new()
            }
        }
    }

    /// Token price in `currency`, served from cache within the refresh interval.
    pub async fn token_price(&self, currency: CurrencyTicker) -> Option<Money> {
        let key = PriceCache::key(self.source.token_symbol(), currency);
        if let Some(price) = self.cache.get(&key).await {
            debug!(%currency, "token price cache hit");
            return Some(Money::new(price, currency));
        }
        self.fetch_token_price(currency, key).await
    }

    /// Skips the cache and replaces whatever it held. Expired entries for
    /// other currencies are dropped on the way.
    pub async fn refresh_token_price(&self, currency: CurrencyTicker) -> Option<Money> {
        let key = PriceCache::key(self.source.token_symbol(), currency);
        self.cache.invalidate(&key).await;
        self.cache.clear_expired().await;
        self.fetch_token_price(currency, key).await
    }

    async fn fetch_token_price(&self, currency: CurrencyTicker, key: String) -> Option<Money> {
        match self.source.token_price(currency).await {
            Ok(price) => {
                self.cache.put(key, price.decimal).await;
                Some(price)
            }
            Err(err) => {
                error!(%currency, error = %err, "failed to fetch token price");
                None
            }
        }
    }

    pub async fn sheet_token_price(&self, network: Network) -> Option<f64> {
        match self.source.sheet_token_price(network).await {
            Ok(price) => price,
            Err(err) => {
                error!(%network, error = %err, "failed to fetch sheet token price");
                None
            }
        }
    }

    /// Per-unit IAP prices of the tracked items in the viewer's currency.
    pub async fn averages(&self, context: ViewContext) -> Result<Vec<AveragePrice>, ConversionError> {
        let products = flatten_products(&self.categories(context.network).await);
        average_price_stats(&products, &self.tracked_items, context.currency, &self.converter)
    }

    /// Listings for `sub_type`, sorted and priced against the IAP catalog.
    pub async fn market_board(
        &self,
        context: ViewContext,
        sub_type: ItemSubType,
        sort: SortKey,
        limit: u64,
    ) -> Result<MarketBoard, ConversionError> {
        let (page, token_price, categories) = tokio::join!(
            self.item_products(context.network, sub_type, 0, limit),
            self.token_price(context.currency),
            self.categories(context.network),
        );

        let mut item_ids: Vec<u32> = page.item_products.iter().map(|p| p.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();

        let products = flatten_products(&categories);
        let averages: BTreeMap<u32, Money> =
            average_price_stats(&products, &item_ids, context.currency, &self.converter)?
                .into_iter()
                .map(|average| (average.sheet_id, average.average_price))
                .collect();

        let listings = sort
            .sort(&page.item_products)
            .into_iter()
            .map(|listing| {
                let comparison = token_price.as_ref().and_then(|rate| {
                    averages
                        .get(&listing.item_id)
                        .and_then(|average| compare(listing.unit_price, average, rate))
                });
                ListingView {
                    item_name: item_display_name(listing.item_id),
                    unit_price: token_price
                        .map(|rate| Money::new(listing.unit_price * rate.decimal, rate.ticker())),
                    total_price: token_price
                        .map(|rate| Money::new(listing.price as f64 * rate.decimal, rate.ticker())),
                    comparison,
                    listing,
                }
            })
            .collect();

        Ok(MarketBoard {
            context,
            sub_type,
            sort,
            total_count: page.total_count,
            token_price,
            listings,
        })
    }

    /// IAP catalog with the tracked per-unit prices and their token equivalents.
    pub async fn iap_board(&self, context: ViewContext) -> Result<IapBoard, ConversionError> {
        let (categories, token_price) = tokio::join!(
            self.categories(context.network),
            self.token_price(context.currency),
        );

        let products = flatten_products(&categories);
        let averages = average_price_stats(
            &products,
            &self.tracked_items,
            context.currency,
            &self.converter,
        )?
        .into_iter()
        .map(|average| AverageView {
            item_name: item_display_name(average.sheet_id),
            token_equivalent: token_equivalent(&average.average_price, token_price.as_ref()),
            average,
        })
        .collect();

        Ok(IapBoard {
            context,
            token_price,
            averages,
            categories,
        })
    }
}
