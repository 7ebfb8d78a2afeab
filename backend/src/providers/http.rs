//! Shared HTTP plumbing for the upstream adapters.

use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{ProviderError, RecordError};
use crate::models::{Flight, SearchQuery};

/// Per-request transport timeout used when the configuration does not set one.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(2);

/// Build the reqwest client shared by every adapter.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// One upstream search endpoint: `{base_url}/{slug}/search`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    base_url: String,
    slug: &'static str,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(base_url: impl Into<String>, slug: &'static str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            slug,
            client,
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/{}/search", self.base_url, self.slug)
    }

    /// GET the search endpoint and decode the body as `T`.
    ///
    /// The query's cache-relevant fields are forwarded as URL parameters.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        provider: &str,
        query: &SearchQuery,
    ) -> Result<T, ProviderError> {
        let passengers = query.passengers.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("origin", query.origin.as_str()),
                ("destination", query.destination.as_str()),
                ("departure_date", query.departure_date.as_str()),
                ("passengers", passengers.as_str()),
                ("cabin_class", query.cabin_class.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::transport(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: provider.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(provider, e))?;

        serde_json::from_slice(&body).map_err(|e| ProviderError::decode(provider, e))
    }
}

/// Map raw upstream records, skipping the ones that fail to normalize.
pub fn map_records<R, F>(provider: &str, records: Vec<R>, mut map: F) -> Vec<Flight>
where
    F: FnMut(R) -> Result<Flight, RecordError>,
{
    let total = records.len();
    let flights: Vec<Flight> = records
        .into_iter()
        .filter_map(|raw| match map(raw) {
            Ok(flight) => Some(flight),
            Err(e) => {
                debug!("{}: skipping record: {}", provider, e);
                None
            }
        })
        .collect();

    if flights.len() < total {
        debug!(
            "{}: mapped {} of {} records",
            provider,
            flights.len(),
            total
        );
    }
    flights
}

/// Whole minutes between two instants, clamped at zero.
pub fn minutes_between(
    departure: &chrono::DateTime<chrono::FixedOffset>,
    arrival: &chrono::DateTime<chrono::FixedOffset>,
) -> u32 {
    u32::try_from((*arrival - *departure).num_minutes()).unwrap_or(0)
}
