use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{MarketSource, SourceError, SourceFuture};
use crate::throttling::RequestThrottle;
use crate::{
    Category, CurrencyTicker, ItemSubType, MarketItemProductsResponse, Money, Network,
    NetworkPrice,
};

/// Client for the Nine Chronicles market, product, price-sheet and coin price APIs.
#[derive(Clone)]
pub struct NineChroniclesApi {
    http_client: Arc<dyn HttpClient>,
    api: ApiConfig,
    throttle: RequestThrottle,
}

#[derive(Debug, Deserialize)]
struct SheetTokenPrice {
    #[serde(default)]
    price: Option<f64>,
}

impl NineChroniclesApi {
    pub fn new(http_client: Arc<dyn HttpClient>, api: ApiConfig, throttle: RequestThrottle) -> Self {
        Self {
            http_client,
            api,
            throttle,
        }
    }

    pub fn item_products_url(
        &self,
        network: Network,
        sub_type: ItemSubType,
        offset: u64,
        limit: u64,
    ) -> Result<String, SourceError> {
        let base = self
            .api
            .market_api
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SourceError::not_configured("api.market_api"))?;

        Ok(format!(
            "{}/{}/Market/products/items/{}?offset={offset}&limit={limit}&order=unit_price_asc",
            base.trim_end_matches('/'),
            network.market_provider(),
            sub_type.code(),
        ))
    }

    pub fn categories_url(&self, network: Network) -> String {
        format!(
            "{}/product?agent_addr&planet_id={}",
            self.api.product_api.trim_end_matches('/'),
            network.planet_id()
        )
    }

    pub fn prices_url(&self, network: Network) -> String {
        format!(
            "{}/{network}.prices.json",
            self.api.price_api.trim_end_matches('/')
        )
    }

    pub fn token_price_url(&self, currency: CurrencyTicker) -> String {
        format!(
            "{}/{}/price?currency={currency}",
            self.api.crypto_price_api.trim_end_matches('/'),
            urlencoding::encode(&self.api.token_symbol)
        )
    }

    pub fn sheet_token_price_url(&self, network: Network) -> String {
        format!(
            "{}/{network}.wncg.json",
            self.api.price_api.trim_end_matches('/')
        )
    }

    async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        self.throttle.acquire().await;
        debug!(url, "upstream request");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json, text/plain")
            .with_timeout_ms(self.api.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::transport(format!("{url}: {}", error.message())))?;

        if !response.is_success() {
            return Err(SourceError::upstream_status(response.status, url));
        }
        debug!(url, status = response.status, bytes = response.body.len(), "upstream response");
        Ok(response.body)
    }

    async fn fetch_json<T>(&self, url: &str) -> Result<T, SourceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let body = self.fetch(url).await?;
        serde_json::from_str(&body)
            .map_err(|error| SourceError::invalid_response(format!("{url}: {error}")))
    }

    async fn load_item_products(
        &self,
        network: Network,
        sub_type: ItemSubType,
        offset: u64,
        limit: u64,
    ) -> Result<MarketItemProductsResponse, SourceError> {
        let url = self.item_products_url(network, sub_type, offset, limit)?;
        let response: MarketItemProductsResponse = self.fetch_json(&url).await?;
        response
            .validate()
            .map_err(|error| SourceError::invalid_response(format!("{url}: {error}")))?;
        Ok(response)
    }

    async fn load_categories(&self, network: Network) -> Result<Vec<Category>, SourceError> {
        let mut categories: Vec<Category> = self.fetch_json(&self.categories_url(network)).await?;
        self.attach_network_prices(network, &mut categories).await;
        Ok(categories)
    }

    async fn load_token_price(&self, currency: CurrencyTicker) -> Result<Money, SourceError> {
        let url = self.token_price_url(currency);
        let body = self.fetch(&url).await?;
        let price: f64 = body.trim().parse().map_err(|_| {
            SourceError::invalid_response(format!("{url}: expected a number, got '{}'", body.trim()))
        })?;

        let price = Money::new(price, currency);
        if !price.is_valid_amount() {
            return Err(SourceError::invalid_response(format!(
                "{url}: token price must be finite and non-negative"
            )));
        }
        Ok(price)
    }

    async fn load_sheet_token_price(&self, network: Network) -> Result<Option<f64>, SourceError> {
        let sheet: SheetTokenPrice = self.fetch_json(&self.sheet_token_price_url(network)).await?;
        Ok(sheet.price.filter(|price| price.is_finite() && *price > 0.0))
    }

    /// Products keep `network_price: None` when the sheet is unavailable.
    async fn attach_network_prices(&self, network: Network, categories: &mut [Category]) {
        let url = self.prices_url(network);
        let prices: BTreeMap<String, NetworkPrice> = match self.fetch_json(&url).await {
            Ok(prices) => prices,
            Err(error) => {
                warn!(%network, %error, "price sheet unavailable; catalog left unpriced");
                return;
            }
        };

        for product in categories
            .iter_mut()
            .flat_map(|category| category.product_list.iter_mut())
        {
            product.network_price = prices.get(&product.name).copied();
        }
    }
}

impl MarketSource for NineChroniclesApi {
    fn item_products<'a>(
        &'a self,
        network: Network,
        sub_type: ItemSubType,
        offset: u64,
        limit: u64,
    ) -> SourceFuture<'a, MarketItemProductsResponse> {
        Box::pin(self.load_item_products(network, sub_type, offset, limit))
    }

    fn categories<'a>(&'a self, network: Network) -> SourceFuture<'a, Vec<Category>> {
        Box::pin(self.load_categories(network))
    }

    fn token_symbol(&self) -> &str {
        &self.api.token_symbol
    }

    fn token_price<'a>(&'a self, currency: CurrencyTicker) -> SourceFuture<'a, Money> {
        Box::pin(self.load_token_price(currency))
    }

    fn sheet_token_price<'a>(&'a self, network: Network) -> SourceFuture<'a, Option<f64>> {
        Box::pin(self.load_sheet_token_price(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{CannedHttpClient, HttpResponse};
    use crate::source::SourceErrorKind;

    fn api(client: CannedHttpClient, market_api: Option<&str>) -> NineChroniclesApi {
        let config = ApiConfig {
            market_api: market_api.map(String::from),
            ..ApiConfig::default()
        };
        NineChroniclesApi::new(Arc::new(client), config, RequestThrottle::per_second(100))
    }

    #[test]
    fn builds_upstream_urls() {
        let api = api(CannedHttpClient::new(), Some("https://market.test/"));

        assert_eq!(
            api.item_products_url(Network::Heimdall, ItemSubType::Hourglass, 0, 50)
                .expect("configured"),
            "https://market.test/marketProviderHeimdall/Market/products/items/15?offset=0&limit=50&order=unit_price_asc"
        );
        assert_eq!(
            api.categories_url(Network::Odin),
            "https://hr6vfhdasc.execute-api.us-east-2.amazonaws.com/mainnet/api/product?agent_addr&planet_id=0x000000000000"
        );
        assert_eq!(
            api.prices_url(Network::Heimdall),
            "https://9c.market/data/heimdall.prices.json"
        );
        assert_eq!(
            api.token_price_url(CurrencyTicker::Krw),
            "https://coinprice-api.9c.market/api/coins/wncg/price?currency=KRW"
        );
    }

    #[tokio::test]
    async fn missing_market_api_is_not_configured() {
        let api = api(CannedHttpClient::new(), None);
        let err = api
            .item_products(Network::Odin, ItemSubType::ApStone, 0, 10)
            .await
            .expect_err("no base url");
        assert_eq!(err.kind(), SourceErrorKind::NotConfigured);
    }

    #[tokio::test]
    async fn parses_plain_text_token_price() {
        let client = CannedHttpClient::new().respond("/price?currency=EUR", HttpResponse::ok(" 0.0375\n"));
        let price = api(client, None)
            .token_price(CurrencyTicker::Eur)
            .await
            .expect("parses");
        assert_eq!(price, Money::new(0.0375, CurrencyTicker::Eur));
    }

    #[tokio::test]
    async fn rejects_non_numeric_and_failed_token_price() {
        let client = CannedHttpClient::new()
            .respond("currency=USD", HttpResponse::ok("n/a"))
            .respond("currency=JPY", HttpResponse::with_status(502, "bad gateway"));
        let api = api(client, None);

        let err = api.token_price(CurrencyTicker::Usd).await.expect_err("not a number");
        assert_eq!(err.kind(), SourceErrorKind::InvalidResponse);

        let err = api.token_price(CurrencyTicker::Jpy).await.expect_err("502");
        assert_eq!(err.kind(), SourceErrorKind::UpstreamStatus);

        let err = api.token_price(CurrencyTicker::Php).await.expect_err("no route");
        assert_eq!(err.kind(), SourceErrorKind::Transport);
    }

    #[tokio::test]
    async fn sheet_token_price_ignores_missing_value() {
        let client = CannedHttpClient::new()
            .respond("odin.wncg.json", HttpResponse::ok(r#"{"price": 61.5}"#))
            .respond("heimdall.wncg.json", HttpResponse::ok("{}"));
        let api = api(client, None);

        assert_eq!(
            api.sheet_token_price(Network::Odin).await.expect("parses"),
            Some(61.5)
        );
        assert_eq!(
            api.sheet_token_price(Network::Heimdall).await.expect("parses"),
            None
        );
    }
}
