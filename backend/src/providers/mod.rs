//! Upstream source adapters.
//!
//! Each adapter talks to exactly one upstream, decodes its native envelope and
//! maps the records into [`Flight`]. The aggregation engine only ever sees
//! `Arc<dyn FlightProvider>` and never special-cases a concrete adapter.
//!
//! # Adapters
//!
//! - [`airasia::AirAsiaProvider`]
//! - [`batik::BatikProvider`]
//! - [`garuda::GarudaProvider`]
//! - [`lion::LionAirProvider`]

use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderSettings;
use crate::error::{ConfigError, ProviderError};
use crate::models::{Flight, SearchQuery};

pub mod airasia;
pub mod batik;
pub mod garuda;
pub mod http;
pub mod lion;

pub use airasia::AirAsiaProvider;
pub use batik::BatikProvider;
pub use garuda::GarudaProvider;
pub use http::{build_http_client, HttpUpstream, DEFAULT_HTTP_TIMEOUT};
pub use lion::LionAirProvider;

/// Capability implemented by every upstream source.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` and hold no per-query state; the same
/// instance is invoked concurrently from independent searches.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Identity used in logs only.
    fn name(&self) -> &str;

    /// Fetch and normalize flights for a query.
    ///
    /// Records that fail to normalize are skipped; only a whole-call failure
    /// is returned as an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError>;
}

/// Known upstream kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    AirAsia,
    Batik,
    Garuda,
    Lion,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::AirAsia, Self::Batik, Self::Garuda, Self::Lion];

    /// Path segment of the upstream search endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::AirAsia => AirAsiaProvider::SLUG,
            Self::Batik => BatikProvider::SLUG,
            Self::Garuda => GarudaProvider::SLUG,
            Self::Lion => LionAirProvider::SLUG,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "airasia" | "air_asia" => Ok(Self::AirAsia),
            "batik" | "batik_air" => Ok(Self::Batik),
            "garuda" | "garuda_indonesia" => Ok(Self::Garuda),
            "lion" | "lion_air" => Ok(Self::Lion),
            _ => Err(format!("Unknown provider kind: {}", s)),
        }
    }
}

/// Construct one adapter.
pub fn create_provider(
    kind: ProviderKind,
    base_url: impl Into<String>,
    client: reqwest::Client,
) -> Arc<dyn FlightProvider> {
    match kind {
        ProviderKind::AirAsia => Arc::new(AirAsiaProvider::new(base_url, client)),
        ProviderKind::Batik => Arc::new(BatikProvider::new(base_url, client)),
        ProviderKind::Garuda => Arc::new(GarudaProvider::new(base_url, client)),
        ProviderKind::Lion => Arc::new(LionAirProvider::new(base_url, client)),
    }
}

/// Build the ordered adapter registry from configuration.
pub fn create_providers(
    settings: &[ProviderSettings],
) -> Result<Vec<Arc<dyn FlightProvider>>, ConfigError> {
    settings
        .iter()
        .map(|s| {
            let kind: ProviderKind = s.kind.parse().map_err(ConfigError::Invalid)?;
            let client = build_http_client(Duration::from_millis(s.timeout_ms)).map_err(|e| {
                ConfigError::Invalid(format!("Failed to build HTTP client: {}", e))
            })?;
            Ok(create_provider(kind, s.base_url.clone(), client))
        })
        .collect()
}
