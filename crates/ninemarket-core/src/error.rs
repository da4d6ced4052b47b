use thiserror::Error;

use crate::CurrencyTicker;

/// Validation and parsing errors exposed by `ninemarket-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown currency '{value}', expected one of USD, EUR, JPY, KRW, PHP, VND")]
    UnknownCurrency { value: String },
    #[error("unknown network '{value}', expected one of odin, heimdall")]
    UnknownNetwork { value: String },
    #[error("unknown item sub type '{value}', expected one of HOURGLASS, AP_STONE, SCROLL, CIRCLE")]
    UnknownItemSubType { value: String },
    #[error("unknown sort key '{value}', expected one of unit-price, price, quantity")]
    UnknownSortKey { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("listing quantity must be greater than zero")]
    ZeroQuantity,
    #[error("product id must be a UUID: '{value}'")]
    InvalidProductId { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Failure of a single currency conversion call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unsupported currency: {code}")]
    UnsupportedCurrency { code: String },
    #[error("converter base is {base} but the amount is in {actual}")]
    BaseMismatch {
        base: CurrencyTicker,
        actual: CurrencyTicker,
    },
}

impl ConversionError {
    pub fn unsupported(code: impl Into<String>) -> Self {
        Self::UnsupportedCurrency { code: code.into() }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing configuration value '{key}'")]
    Missing { key: &'static str },
    #[error("invalid configuration value '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Preference store read/write errors.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
