//! Application configuration.
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) yields a working setup, except for the market API base URL.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pricing::{CurrencyConverter, ExchangeRates};
use crate::{ConfigError, CurrencyTicker, Network};

pub const CONFIG_PATH_ENV: &str = "NINEMARKET_CONFIG";
pub const LOG_LEVEL_ENV: &str = "NINEMARKET_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    /// Ticker → units per one USD. Entries here replace the built-in rates.
    #[serde(default)]
    pub exchange_rates: BTreeMap<String, f64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

/// Remote endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_product_api")]
    pub product_api: String,
    #[serde(default = "default_price_api")]
    pub price_api: String,
    #[serde(default = "default_crypto_price_api")]
    pub crypto_price_api: String,
    /// Marketplace listings service. Has no public default.
    #[serde(default)]
    pub market_api: Option<String>,
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_product_api() -> String {
    "https://hr6vfhdasc.execute-api.us-east-2.amazonaws.com/mainnet/api".into()
}

fn default_price_api() -> String {
    "https://9c.market/data".into()
}

fn default_crypto_price_api() -> String {
    "https://coinprice-api.9c.market/api/coins".into()
}

fn default_token_symbol() -> String {
    "wncg".into()
}

const fn default_timeout_ms() -> u64 {
    5_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            product_api: default_product_api(),
            price_api: default_price_api(),
            crypto_price_api: default_crypto_price_api(),
            market_api: None,
            token_symbol: default_token_symbol(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

const fn default_page_size() -> u64 {
    100
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// View context used when nothing has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_currency")]
    pub currency: CurrencyTicker,
    #[serde(default = "default_network")]
    pub network: Network,
}

const fn default_currency() -> CurrencyTicker {
    CurrencyTicker::Usd
}

const fn default_network() -> Network {
    Network::Odin
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            network: default_network(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_token_price_secs")]
    pub token_price_secs: u64,
}

const fn default_token_price_secs() -> u64 {
    5 * 60
}

impl RefreshConfig {
    pub fn token_price_interval(&self) -> Duration {
        Duration::from_secs(self.token_price_secs)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            token_price_secs: default_token_price_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

const fn default_requests_per_second() -> u32 {
    5
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Where the view context is persisted. Defaults to
    /// `$HOME/.ninemarket/preferences.toml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PreferencesConfig {
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".ninemarket").join("preferences.toml")
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Explicit path first, then `NINEMARKET_CONFIG`, then built-in defaults.
    /// `NINEMARKET_LOG_LEVEL` overrides the logging level either way.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                config.logging.level = level;
            }
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.market.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "market.page_size",
                message: String::from("must be greater than zero"),
            });
        }
        if self.throttle.requests_per_second == 0 {
            return Err(ConfigError::Invalid {
                key: "throttle.requests_per_second",
                message: String::from("must be greater than zero"),
            });
        }
        if self.refresh.token_price_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "refresh.token_price_secs",
                message: String::from("must be greater than zero"),
            });
        }
        self.exchange_rates().map(|_| ())
    }

    pub fn market_api(&self) -> Result<&str, ConfigError> {
        self.api
            .market_api
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing {
                key: "api.market_api",
            })
    }

    /// Built-in USD rates with the configured overrides applied.
    pub fn exchange_rates(&self) -> Result<ExchangeRates, ConfigError> {
        let mut rates = ExchangeRates::usd_defaults();
        for (code, rate) in &self.exchange_rates {
            let ticker: CurrencyTicker = code.parse().map_err(|_| ConfigError::Invalid {
                key: "exchange_rates",
                message: format!("unknown currency '{code}'"),
            })?;
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(ConfigError::Invalid {
                    key: "exchange_rates",
                    message: format!("rate for {ticker} must be a positive number"),
                });
            }
            rates.insert(ticker, *rate);
        }
        Ok(rates)
    }

    pub fn converter(&self) -> Result<CurrencyConverter, ConfigError> {
        Ok(CurrencyConverter::new(
            CurrencyTicker::Usd,
            self.exchange_rates()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.refresh.token_price_interval(), Duration::from_secs(300));
        assert_eq!(config.defaults.currency, CurrencyTicker::Usd);
        assert_eq!(config.defaults.network, Network::Odin);
    }

    #[test]
    fn market_api_must_be_configured() {
        let config = AppConfig::default();
        assert!(matches!(
            config.market_api(),
            Err(ConfigError::Missing {
                key: "api.market_api"
            })
        ));

        let config = AppConfig::from_toml_str(
            r#"
            [api]
            market_api = "https://market.example.test"
            "#,
        )
        .expect("valid config");
        assert_eq!(
            config.market_api().expect("configured"),
            "https://market.example.test"
        );
    }

    #[test]
    fn rate_overrides_replace_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [exchange_rates]
            krw = 1400.0

            [defaults]
            currency = "KRW"
            network = "heimdall"
            "#,
        )
        .expect("valid config");

        let rates = config.exchange_rates().expect("valid rates");
        assert_eq!(rates.get(CurrencyTicker::Krw), Some(1400.0));
        assert_eq!(rates.get(CurrencyTicker::Eur), Some(0.88));
        assert_eq!(config.defaults.network, Network::Heimdall);
    }

    #[test]
    fn rejects_bad_rates_and_zero_limits() {
        assert!(matches!(
            AppConfig::from_toml_str("[exchange_rates]\nXYZ = 1.0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[exchange_rates]\nEUR = -1.0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[market]\npage_size = 0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[logging\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
