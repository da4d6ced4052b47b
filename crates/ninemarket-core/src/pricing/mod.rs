//! Pure pricing functions: conversion, per-unit IAP price, and listing
//! comparison. Nothing here performs I/O.

pub mod average;
pub mod comparison;
pub mod converter;

pub use average::{
    average_price, average_price_stats, token_equivalent, AveragePrice, DEFAULT_TRACKED_ITEMS,
};
pub use comparison::{compare, PriceComparison};
pub use converter::{CurrencyConverter, ExchangeRates};
