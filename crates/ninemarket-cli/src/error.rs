use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ninemarket_core::ValidationError),

    #[error(transparent)]
    Config(#[from] ninemarket_core::ConfigError),

    #[error(transparent)]
    Conversion(#[from] ninemarket_core::ConversionError),

    #[error(transparent)]
    Preference(#[from] ninemarket_core::PreferenceError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) | Self::Conversion(_) => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Preference(_) | Self::Io(_) => 10,
        }
    }
}
