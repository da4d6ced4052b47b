use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Fiat currencies the dashboard can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyTicker {
    Usd,
    Eur,
    Jpy,
    Krw,
    Php,
    Vnd,
}

impl CurrencyTicker {
    pub const ALL: [Self; 6] = [
        Self::Usd,
        Self::Eur,
        Self::Jpy,
        Self::Krw,
        Self::Php,
        Self::Vnd,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Jpy => "JPY",
            Self::Krw => "KRW",
            Self::Php => "PHP",
            Self::Vnd => "VND",
        }
    }
}

impl Display for CurrencyTicker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyTicker {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|ticker| ticker.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownCurrency {
                value: value.to_owned(),
            })
    }
}

/// Display descriptor for a currency. The ticker alone determines the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Currency {
    pub ticker: CurrencyTicker,
    pub symbol: &'static str,
    pub decimal_places: u8,
}

impl Currency {
    pub const fn of(ticker: CurrencyTicker) -> Self {
        let (symbol, decimal_places) = match ticker {
            CurrencyTicker::Usd => ("$", 4),
            CurrencyTicker::Eur => ("€", 4),
            CurrencyTicker::Jpy => ("¥", 2),
            CurrencyTicker::Krw => ("₩", 2),
            CurrencyTicker::Php => ("₱", 2),
            CurrencyTicker::Vnd => ("đ", 2),
        };

        Self {
            ticker,
            symbol,
            decimal_places,
        }
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            ticker: CurrencyTicker,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::of(raw.ticker))
    }
}
