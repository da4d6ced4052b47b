use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ConversionError, CurrencyTicker, Money};

/// Exchange rates expressed as "target units per one base unit".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates(BTreeMap<CurrencyTicker, f64>);

impl ExchangeRates {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Reference table against USD.
    pub fn usd_defaults() -> Self {
        Self::empty()
            .with_rate(CurrencyTicker::Usd, 1.0)
            .with_rate(CurrencyTicker::Krw, 1359.56)
            .with_rate(CurrencyTicker::Eur, 0.88)
            .with_rate(CurrencyTicker::Jpy, 143.15)
            .with_rate(CurrencyTicker::Php, 55.69)
            .with_rate(CurrencyTicker::Vnd, 26098.49)
    }

    pub fn with_rate(mut self, ticker: CurrencyTicker, rate: f64) -> Self {
        self.0.insert(ticker, rate);
        self
    }

    pub fn insert(&mut self, ticker: CurrencyTicker, rate: f64) {
        self.0.insert(ticker, rate);
    }

    pub fn get(&self, ticker: CurrencyTicker) -> Option<f64> {
        self.0.get(&ticker).copied()
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::usd_defaults()
    }
}

/// Converts base-currency amounts with a fixed rate table.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyConverter {
    base: CurrencyTicker,
    rates: ExchangeRates,
}

impl CurrencyConverter {
    pub fn new(base: CurrencyTicker, rates: ExchangeRates) -> Self {
        Self { base, rates }
    }

    pub const fn base(&self) -> CurrencyTicker {
        self.base
    }

    /// Converts `money` into `target`.
    ///
    /// Converting into the currency the amount is already in returns it
    /// untouched. Any other conversion requires the amount to be in the base
    /// currency and `target` to have a configured rate.
    pub fn convert(&self, money: &Money, target: CurrencyTicker) -> Result<Money, ConversionError> {
        if money.ticker() == target {
            return Ok(*money);
        }
        if money.ticker() != self.base {
            return Err(ConversionError::BaseMismatch {
                base: self.base,
                actual: money.ticker(),
            });
        }

        let rate = self.rate(target)?;
        Ok(Money::new(money.decimal * rate, target))
    }

    /// Like [`convert`](Self::convert) for a ticker that has not been parsed yet.
    pub fn convert_code(&self, money: &Money, code: &str) -> Result<Money, ConversionError> {
        let target = code
            .parse::<CurrencyTicker>()
            .map_err(|_| ConversionError::unsupported(code.trim()))?;
        self.convert(money, target)
    }

    pub fn rate(&self, target: CurrencyTicker) -> Result<f64, ConversionError> {
        if target == self.base {
            return Ok(1.0);
        }
        self.rates
            .get(target)
            .ok_or_else(|| ConversionError::unsupported(target.as_str()))
    }

    pub fn is_supported(&self, target: CurrencyTicker) -> bool {
        self.rate(target).is_ok()
    }

    pub fn supported_currencies(&self) -> Vec<CurrencyTicker> {
        CurrencyTicker::ALL
            .into_iter()
            .filter(|ticker| self.is_supported(*ticker))
            .collect()
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(CurrencyTicker::Usd, ExchangeRates::usd_defaults())
    }
}
