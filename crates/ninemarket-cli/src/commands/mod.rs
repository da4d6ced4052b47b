mod averages;
mod convert;
mod iap;
mod market;
mod prefs;
mod price;
mod watch;

use std::sync::Arc;
use std::time::Instant;

use ninemarket_core::{
    AppConfig, CurrencyConverter, Envelope, EnvelopeError, EnvelopeMeta, FilePreferenceStore,
    MarketService, NineChroniclesApi, PriceCache, ReqwestHttpClient, RequestThrottle,
    ViewContext,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Everything a command needs, resolved once per invocation.
pub struct Runtime {
    pub config: AppConfig,
    pub context: ViewContext,
    pub store: FilePreferenceStore,
    pub converter: CurrencyConverter,
}

impl Runtime {
    /// Persisted selection first, then `--currency` / `--network` for this run.
    pub fn new(cli: &Cli, config: AppConfig) -> Result<Self, CliError> {
        let store = FilePreferenceStore::new(config.preferences.resolved_path());
        let mut context = ViewContext::load(&store, &config.defaults);
        if let Some(currency) = &cli.currency {
            context = context.with_currency(currency.parse()?);
        }
        if let Some(network) = &cli.network {
            context = context.with_network(network.parse()?);
        }
        let converter = config.converter()?;

        Ok(Self {
            config,
            context,
            store,
            converter,
        })
    }

    pub fn service(&self) -> MarketService {
        let api = NineChroniclesApi::new(
            Arc::new(ReqwestHttpClient::new()),
            self.config.api.clone(),
            RequestThrottle::per_second(self.config.throttle.requests_per_second),
        );
        MarketService::new(
            Arc::new(api),
            self.converter.clone(),
            PriceCache::new(self.config.refresh.token_price_interval()),
        )
    }
}

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn warn_if(self, condition: bool, warning: impl Into<String>) -> Self {
        if condition {
            self.with_warning(warning)
        } else {
            self
        }
    }
}

pub async fn run(cli: &Cli, runtime: &Runtime) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let result = match &cli.command {
        Command::Price => price::run(runtime).await?,
        Command::Convert(args) => convert::run(args, runtime)?,
        Command::Market(args) => market::run(args, runtime).await?,
        Command::Iap => iap::run(runtime).await?,
        Command::Averages(args) => averages::run(args, runtime).await?,
        Command::Prefs(args) => prefs::run(args, runtime)?,
        Command::Watch(args) => watch::run(args, runtime, cli).await?,
    };

    envelope(runtime.context, result, started)
}

pub fn envelope(
    context: ViewContext,
    result: CommandResult,
    started: Instant,
) -> Result<Envelope<Value>, CliError> {
    let CommandResult {
        data,
        warnings,
        errors,
    } = result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        context.network,
        context.currency,
        latency_ms,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::with_errors(meta, data, errors)?)
}

#[cfg(test)]
mod tests {
    use ninemarket_core::{CurrencyTicker, Network};

    use super::*;

    #[test]
    fn envelope_carries_warnings_and_errors() {
        let result = CommandResult::ok(serde_json::json!({"rows": []}))
            .warn_if(true, "no listings returned")
            .warn_if(false, "never shown")
            .with_error(EnvelopeError::new("price.unavailable", "offline").expect("valid entry"));

        let context = ViewContext::new(CurrencyTicker::Php, Network::Heimdall);
        let envelope = envelope(context, result, Instant::now()).expect("valid envelope");

        assert_eq!(envelope.meta.warnings, vec![String::from("no listings returned")]);
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].code, "price.unavailable");
        assert_eq!(envelope.meta.currency, CurrencyTicker::Php);
        assert_eq!(envelope.meta.network, Network::Heimdall);
        assert!(Uuid::parse_str(&envelope.meta.request_id).is_ok());
    }
}
