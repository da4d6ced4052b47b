//! Behavior tests for the persisted view context and the config file that
//! seeds it.

use std::fs;

use ninemarket_core::config::DefaultsConfig;
use ninemarket_core::{
    AppConfig, ConfigError, CurrencyTicker, FilePreferenceStore, Network, PreferenceStore,
    ViewContext, CURRENCY_KEY, NETWORK_KEY,
};

// =============================================================================
// File-backed preference store
// =============================================================================

#[test]
fn when_no_file_exists_defaults_are_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FilePreferenceStore::new(dir.path().join("missing.toml"));

    assert_eq!(store.get(CURRENCY_KEY).expect("missing file reads as empty"), None);

    let defaults = DefaultsConfig {
        currency: CurrencyTicker::Krw,
        network: Network::Heimdall,
    };
    assert_eq!(
        ViewContext::load(&store, &defaults),
        ViewContext::new(CurrencyTicker::Krw, Network::Heimdall)
    );
}

#[test]
fn saved_selection_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state").join("preferences.toml");

    // Given: a selection saved through one store
    let store = FilePreferenceStore::new(&path);
    ViewContext::save_currency(&store, CurrencyTicker::Jpy).expect("writable");
    ViewContext::save_network(&store, Network::Heimdall).expect("writable");

    // When: a fresh store reads the same file
    let reopened = FilePreferenceStore::new(&path);
    let context = ViewContext::load(&reopened, &DefaultsConfig::default());

    // Then: the saved values win over the defaults
    assert_eq!(
        context,
        ViewContext::new(CurrencyTicker::Jpy, Network::Heimdall)
    );

    let written = fs::read_to_string(&path).expect("file exists");
    assert!(written.contains(CURRENCY_KEY));
    assert!(written.contains("JPY"));
}

#[test]
fn saving_one_key_keeps_the_other() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FilePreferenceStore::new(dir.path().join("preferences.toml"));

    store.set(NETWORK_KEY, "heimdall").expect("writable");
    store.set(CURRENCY_KEY, "EUR").expect("writable");
    store.set(CURRENCY_KEY, "PHP").expect("writable");

    assert_eq!(
        store.get(NETWORK_KEY).expect("readable").as_deref(),
        Some("heimdall")
    );
    assert_eq!(
        store.get(CURRENCY_KEY).expect("readable").as_deref(),
        Some("PHP")
    );
}

#[test]
fn when_stored_values_are_stale_each_falls_back_on_its_own() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.toml");
    fs::write(
        &path,
        format!("\"{CURRENCY_KEY}\" = \"BTC\"\n\"{NETWORK_KEY}\" = \"heimdall\"\n"),
    )
    .expect("seed file");

    let context = ViewContext::load(&FilePreferenceStore::new(&path), &DefaultsConfig::default());
    assert_eq!(
        context,
        ViewContext::new(CurrencyTicker::Usd, Network::Heimdall)
    );
}

#[test]
fn when_file_is_corrupt_reads_fail_but_load_falls_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "this is [not toml").expect("seed file");
    let store = FilePreferenceStore::new(&path);

    assert!(store.get(CURRENCY_KEY).is_err());
    assert_eq!(
        ViewContext::load(&store, &DefaultsConfig::default()),
        ViewContext::new(CurrencyTicker::Usd, Network::Odin)
    );
}

// =============================================================================
// Config file
// =============================================================================

#[test]
fn config_file_sets_defaults_and_preference_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefs = dir.path().join("prefs.toml");
    let config_path = dir.path().join("ninemarket.toml");
    fs::write(
        &config_path,
        format!(
            "[defaults]\ncurrency = \"EUR\"\nnetwork = \"heimdall\"\n\n[preferences]\npath = {:?}\n",
            prefs.display().to_string()
        ),
    )
    .expect("write config");

    let config = AppConfig::load(&config_path).expect("valid config");
    assert_eq!(config.defaults.currency, CurrencyTicker::Eur);
    assert_eq!(config.defaults.network, Network::Heimdall);
    assert_eq!(config.preferences.resolved_path(), prefs);

    let store = FilePreferenceStore::new(config.preferences.resolved_path());
    assert_eq!(
        ViewContext::load(&store, &config.defaults),
        ViewContext::new(CurrencyTicker::Eur, Network::Heimdall)
    );
}

#[test]
fn unreadable_config_path_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = AppConfig::load(dir.path().join("absent.toml")).expect_err("no such file");
    assert!(matches!(err, ConfigError::Read { .. }));
}
