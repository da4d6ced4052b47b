//! Command-line surface of `ninemarket`.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `price` | Current token price in the selected currency |
//! | `convert` | Convert a USD amount with the configured rate table |
//! | `market` | Market listings priced in fiat and compared with IAP |
//! | `iap` | IAP catalog with per-unit prices of tracked items |
//! | `averages` | Per-unit IAP prices only |
//! | `watch` | Re-fetch the token price on the refresh interval |
//! | `prefs` | Show or change the persisted currency and network |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Nine Chronicles market prices in your currency.
#[derive(Debug, Parser)]
#[command(name = "ninemarket", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Currency for this run only (USD, EUR, JPY, KRW, PHP, VND).
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Network for this run only (odin, heimdall).
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Config file. Falls back to $NINEMARKET_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current token price.
    Price,

    /// Convert a USD amount.
    ///
    ///   ninemarket convert 4.99 --to KRW
    ///   ninemarket convert 10 --all
    Convert(ConvertArgs),

    /// Market listings for one item sub type.
    ///
    ///   ninemarket market hourglass --sort quantity --limit 20
    Market(MarketArgs),

    /// IAP catalog.
    Iap,

    /// Per-unit IAP prices of tracked items.
    Averages(AveragesArgs),

    /// Keep refreshing the token price.
    Watch(WatchArgs),

    /// Persisted view preferences.
    Prefs(PrefsArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount in USD.
    pub amount: f64,

    /// Target currency code; defaults to the selected currency.
    #[arg(long, conflicts_with = "all")]
    pub to: Option<String>,

    /// Convert into every supported currency.
    #[arg(long, default_value_t = false)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct MarketArgs {
    /// hourglass, ap-stone, scroll, or circle.
    pub sub_type: String,

    /// unit-price, price, or quantity.
    #[arg(long, default_value = "unit-price")]
    pub sort: String,

    /// Page size; defaults to `market.page_size`.
    #[arg(long)]
    pub limit: Option<u64>,
}

#[derive(Debug, Args)]
pub struct AveragesArgs {
    /// Sheet ids to report instead of the default tracked items.
    #[arg(long = "item", num_args = 1..)]
    pub items: Vec<u32>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many refreshes.
    #[arg(long)]
    pub ticks: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the stored selection and where it lives.
    Show,
    /// Persist the default currency.
    SetCurrency { currency: String },
    /// Persist the default network.
    SetNetwork { network: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ninemarket",
            "market",
            "ap-stone",
            "--sort",
            "quantity",
            "--currency",
            "krw",
            "--format",
            "table",
        ])
        .expect("valid arguments");

        assert_eq!(cli.currency.as_deref(), Some("krw"));
        assert_eq!(cli.format, OutputFormat::Table);
        match cli.command {
            Command::Market(args) => {
                assert_eq!(args.sub_type, "ap-stone");
                assert_eq!(args.sort, "quantity");
                assert_eq!(args.limit, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn convert_rejects_to_with_all() {
        let parsed = Cli::try_parse_from(["ninemarket", "convert", "1", "--to", "EUR", "--all"]);
        assert!(parsed.is_err());
    }
}
