use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Nine Chronicles planet the dashboard reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Odin,
    Heimdall,
}

impl Network {
    pub const ALL: [Self; 2] = [Self::Odin, Self::Heimdall];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Odin => "odin",
            Self::Heimdall => "heimdall",
        }
    }

    pub const fn planet_id(self) -> &'static str {
        match self {
            Self::Odin => "0x000000000000",
            Self::Heimdall => "0x000000000001",
        }
    }

    /// Path segment of the per-planet market provider.
    pub const fn market_provider(self) -> &'static str {
        match self {
            Self::Odin => "marketProviderOdin",
            Self::Heimdall => "marketProviderHeimdall",
        }
    }

    pub const fn explorer_base_url(self) -> &'static str {
        match self {
            Self::Odin => "https://9cscan.com",
            Self::Heimdall => "https://heimdall.9cscan.com",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|network| network.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownNetwork {
                value: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_network_names() {
        assert_eq!("ODIN".parse::<Network>().expect("parses"), Network::Odin);
        assert_eq!(
            " heimdall".parse::<Network>().expect("parses"),
            Network::Heimdall
        );
        assert!("thor".parse::<Network>().is_err());
    }

    #[test]
    fn planet_ids_differ_per_network() {
        assert_eq!(Network::Odin.planet_id(), "0x000000000000");
        assert_eq!(Network::Heimdall.planet_id(), "0x000000000001");
    }
}
