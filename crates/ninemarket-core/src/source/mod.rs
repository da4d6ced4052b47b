//! Remote data sources behind a transport-agnostic trait.

mod ninechronicles;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::{Category, CurrencyTicker, ItemSubType, MarketItemProductsResponse, Money, Network};

pub use ninechronicles::NineChroniclesApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    /// Request never produced a response.
    Transport,
    /// Response came back with a non-2xx status.
    UpstreamStatus,
    /// Body did not parse or failed validation.
    InvalidResponse,
    /// Endpoint has no configured base URL.
    NotConfigured,
}

/// Structured failure from one upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn upstream_status(status: u16, url: &str) -> Self {
        Self {
            kind: SourceErrorKind::UpstreamStatus,
            message: format!("upstream returned status {status} for {url}"),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
        }
    }

    pub fn not_configured(key: &str) -> Self {
        Self {
            kind: SourceErrorKind::NotConfigured,
            message: format!("'{key}' is not configured"),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::UpstreamStatus => "source.upstream_status",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::NotConfigured => "source.not_configured",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Market listings, the IAP catalog, and token prices for one deployment.
pub trait MarketSource: Send + Sync {
    /// One page of listings for `sub_type`, cheapest per unit first.
    fn item_products<'a>(
        &'a self,
        network: Network,
        sub_type: ItemSubType,
        offset: u64,
        limit: u64,
    ) -> SourceFuture<'a, MarketItemProductsResponse>;

    /// IAP catalog with store prices attached where the price sheet has them.
    fn categories<'a>(&'a self, network: Network) -> SourceFuture<'a, Vec<Category>>;

    /// Symbol of the token [`token_price`](Self::token_price) quotes.
    fn token_symbol(&self) -> &str;

    /// Fiat value of one game token.
    fn token_price<'a>(&'a self, currency: CurrencyTicker) -> SourceFuture<'a, Money>;

    /// Per-network KRW token price published next to the price sheet, if any.
    fn sheet_token_price<'a>(&'a self, network: Network) -> SourceFuture<'a, Option<f64>>;
}
