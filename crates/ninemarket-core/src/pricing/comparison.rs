use serde::{Deserialize, Serialize};

use crate::Money;

/// How a market listing's unit price relates to the IAP per-unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    /// Magnitude of the difference, never negative.
    pub percent: f64,
    pub cheaper: bool,
}

fn usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Compares a listing priced at `unit_price` game tokens with `average`,
/// using `rate` as the fiat value of one token.
///
/// Returns `None` whenever the inputs cannot give a meaningful answer:
/// unusable amounts, mismatched currencies, or a zero denominator.
/// A listing exactly at the average counts as cheaper.
pub fn compare(unit_price: f64, average: &Money, rate: &Money) -> Option<PriceComparison> {
    if !usable(unit_price) || !average.is_valid_amount() || !rate.is_valid_amount() {
        return None;
    }
    if average.ticker() != rate.ticker() {
        return None;
    }
    if average.decimal == 0.0 || rate.decimal == 0.0 {
        return None;
    }

    let current = unit_price * rate.decimal;
    let percent = 100.0 - (current / average.decimal) * 100.0;
    Some(PriceComparison {
        percent: percent.abs(),
        cheaper: percent >= 0.0,
    })
}
