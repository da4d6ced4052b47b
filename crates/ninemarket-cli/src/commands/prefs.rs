use ninemarket_core::{CurrencyTicker, Network, PreferenceStore, ViewContext};
use serde::Serialize;
use tracing::info;

use crate::cli::{PrefsAction, PrefsArgs};
use crate::error::CliError;

use super::{CommandResult, Runtime};

#[derive(Debug, Serialize)]
struct PrefsData {
    path: String,
    stored: ViewContext,
}

pub fn run(args: &PrefsArgs, runtime: &Runtime) -> Result<CommandResult, CliError> {
    apply(&args.action, &runtime.store)?;

    let stored = ViewContext::load(&runtime.store, &runtime.config.defaults);
    let data = serde_json::to_value(PrefsData {
        path: runtime.store.path().display().to_string(),
        stored,
    })?;
    Ok(CommandResult::ok(data))
}

fn apply(action: &PrefsAction, store: &dyn PreferenceStore) -> Result<(), CliError> {
    match action {
        PrefsAction::Show => {}
        PrefsAction::SetCurrency { currency } => {
            let currency: CurrencyTicker = currency.parse()?;
            ViewContext::save_currency(store, currency)?;
            info!(%currency, "default currency updated");
        }
        PrefsAction::SetNetwork { network } => {
            let network: Network = network.parse()?;
            ViewContext::save_network(store, network)?;
            info!(%network, "default network updated");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ninemarket_core::config::DefaultsConfig;
    use ninemarket_core::FilePreferenceStore;

    use super::*;

    #[test]
    fn set_actions_persist_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FilePreferenceStore::new(dir.path().join("nested").join("prefs.toml"));

        apply(
            &PrefsAction::SetCurrency {
                currency: String::from("vnd"),
            },
            &store,
        )
        .expect("saves currency");
        apply(
            &PrefsAction::SetNetwork {
                network: String::from("Heimdall"),
            },
            &store,
        )
        .expect("saves network");

        let context = ViewContext::load(&store, &DefaultsConfig::default());
        assert_eq!(
            context,
            ViewContext::new(CurrencyTicker::Vnd, Network::Heimdall)
        );
    }

    #[test]
    fn invalid_values_are_rejected_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.toml");
        let store = FilePreferenceStore::new(&path);

        let err = apply(
            &PrefsAction::SetCurrency {
                currency: String::from("BTC"),
            },
            &store,
        )
        .expect_err("BTC is not supported");
        assert_eq!(err.exit_code(), 2);
        assert!(!path.exists());
    }
}
