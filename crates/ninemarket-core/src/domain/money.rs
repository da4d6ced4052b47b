use serde::{Deserialize, Serialize};

use crate::{Currency, CurrencyTicker};

/// An amount tagged with the currency it is expressed in.
///
/// Any finite value is accepted here, including zero and negatives. Callers
/// that need a usable price check [`Money::is_valid_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub decimal: f64,
    pub currency: Currency,
}

impl Money {
    pub const fn new(decimal: f64, ticker: CurrencyTicker) -> Self {
        Self {
            decimal,
            currency: Currency::of(ticker),
        }
    }

    pub const fn usd(decimal: f64) -> Self {
        Self::new(decimal, CurrencyTicker::Usd)
    }

    pub const fn from_currency(decimal: f64, currency: Currency) -> Self {
        Self { decimal, currency }
    }

    pub const fn ticker(&self) -> CurrencyTicker {
        self.currency.ticker
    }

    /// Finite and non-negative.
    pub fn is_valid_amount(&self) -> bool {
        self.decimal.is_finite() && self.decimal >= 0.0
    }
}
