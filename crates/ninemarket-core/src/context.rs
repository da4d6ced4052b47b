//! The viewer's selected currency and network, and where that choice is kept.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DefaultsConfig;
use crate::{CurrencyTicker, Network, PreferenceError};

pub const CURRENCY_KEY: &str = "9c-market-currency";
pub const NETWORK_KEY: &str = "9c-market-network";

/// Key/value persistence for view preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local store, used in tests and when persistence is off.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Flat TOML table on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&values)?)?;
        debug!(path = %self.path.display(), key, "preference saved");
        Ok(())
    }
}

/// Selection every view is rendered for. Passed explicitly, never global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub currency: CurrencyTicker,
    pub network: Network,
}

impl ViewContext {
    pub const fn new(currency: CurrencyTicker, network: Network) -> Self {
        Self { currency, network }
    }

    /// Reads the persisted selection, falling back to `defaults` for anything
    /// missing, unreadable, or no longer valid.
    pub fn load(store: &dyn PreferenceStore, defaults: &DefaultsConfig) -> Self {
        Self {
            currency: load_value(store, CURRENCY_KEY, defaults.currency),
            network: load_value(store, NETWORK_KEY, defaults.network),
        }
    }

    pub fn with_currency(self, currency: CurrencyTicker) -> Self {
        Self { currency, ..self }
    }

    pub fn with_network(self, network: Network) -> Self {
        Self { network, ..self }
    }

    pub fn save_currency(
        store: &dyn PreferenceStore,
        currency: CurrencyTicker,
    ) -> Result<(), PreferenceError> {
        store.set(CURRENCY_KEY, currency.as_str())
    }

    pub fn save_network(store: &dyn PreferenceStore, network: Network) -> Result<(), PreferenceError> {
        store.set(NETWORK_KEY, network.as_str())
    }
}

fn load_value<T>(store: &dyn PreferenceStore, key: &str, fallback: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(error) => {
            warn!(key, %error, %fallback, "could not read preference; using default");
            return fallback;
        }
    };

    raw.parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, %fallback, "ignoring unrecognized preference");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get(CURRENCY_KEY).expect("readable"), None);
        store.set(CURRENCY_KEY, "EUR").expect("writable");
        assert_eq!(
            store.get(CURRENCY_KEY).expect("readable").as_deref(),
            Some("EUR")
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_and_bad_values() {
        let store = MemoryPreferenceStore::new();
        store.set(NETWORK_KEY, "thor").expect("writable");

        let context = ViewContext::load(&store, &DefaultsConfig::default());
        assert_eq!(
            context,
            ViewContext::new(CurrencyTicker::Usd, Network::Odin)
        );
    }

    #[test]
    fn saved_values_win_over_defaults() {
        let store = MemoryPreferenceStore::new();
        ViewContext::save_currency(&store, CurrencyTicker::Php).expect("writable");
        ViewContext::save_network(&store, Network::Heimdall).expect("writable");

        let context = ViewContext::load(&store, &DefaultsConfig::default());
        assert_eq!(context.currency, CurrencyTicker::Php);
        assert_eq!(context.network, Network::Heimdall);
        assert_eq!(
            context.with_currency(CurrencyTicker::Jpy).currency,
            CurrencyTicker::Jpy
        );
    }
}
