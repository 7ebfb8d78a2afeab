//! Query facade: validation, cache lookup, aggregation, filter and rank.

use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

use super::aggregator::Aggregator;
use super::filter::FlightFilter;
use super::ranking::filter_and_rank;
use crate::cache::ResultCache;
use crate::config::AppConfig;
use crate::error::{ConfigError, SearchError};
use crate::models::{Flight, SearchQuery, SearchResult, SortOption};
use crate::providers::{create_providers, FlightProvider};

type InFlightMap = Mutex<HashMap<String, Arc<AsyncMutex<()>>>>;

/// Single entry point for flight searches.
///
/// Cheap to share behind an `Arc`; every search only borrows it. Concurrent
/// misses on one fingerprint queue behind a single aggregation.
pub struct FlightSearchService {
    aggregator: Aggregator,
    in_flight: InFlightMap,
}

/// Claim on the per-fingerprint gate. The map entry is removed once the last
/// claimant lets go.
struct InFlightSlot<'a> {
    slots: &'a InFlightMap,
    key: String,
    gate: Arc<AsyncMutex<()>>,
}

impl<'a> InFlightSlot<'a> {
    fn claim(slots: &'a InFlightMap, key: &str) -> Self {
        let gate = Arc::clone(slots.lock().entry(key.to_string()).or_default());
        Self {
            slots,
            key: key.to_string(),
            gate,
        }
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut slots = self.slots.lock();
        // Only the map and this slot still hold the gate
        if Arc::strong_count(&self.gate) == 2 {
            slots.remove(&self.key);
        }
    }
}

impl FlightSearchService {
    /// Service with default deadline and freshness window.
    pub fn new(providers: Vec<Arc<dyn FlightProvider>>, cache: Arc<ResultCache>) -> Self {
        Self::from_aggregator(Aggregator::new(providers, cache))
    }

    pub fn from_aggregator(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Build the adapters and timing settings from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let providers = create_providers(&config.providers)?;
        let aggregator = Aggregator::new(providers, Arc::new(ResultCache::new()))
            .with_timeout(config.search.aggregation_timeout())
            .with_cache_ttl(config.search.cache_ttl());
        Ok(Self::from_aggregator(aggregator))
    }

    pub fn provider_count(&self) -> usize {
        self.aggregator.providers().len()
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        self.aggregator.cache()
    }

    pub fn aggregation_timeout(&self) -> Duration {
        self.aggregator.timeout()
    }

    /// Run one search.
    ///
    /// Date and time-window inputs are validated before the cache is read, so
    /// a malformed query never triggers upstream calls. A cache hit reports
    /// zero for every provider counter. A caller that misses while another
    /// search for the same fingerprint is aggregating waits for it and is
    /// then served from the cache.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let filter = FlightFilter::from_query(query)?;
        let sort = query.sort_option();
        let query = query.normalized();
        let fingerprint = query.fingerprint();

        if let Some(cached) = self.cache().get(&fingerprint) {
            debug!("Cache hit for {}", fingerprint);
            return Ok(cached_result(&cached, &filter, sort));
        }

        let slot = InFlightSlot::claim(&self.in_flight, &fingerprint);
        let _gate = slot.gate.lock().await;

        if let Some(cached) = self.cache().get(&fingerprint) {
            debug!("Cache filled while waiting for {}", fingerprint);
            return Ok(cached_result(&cached, &filter, sort));
        }

        debug!("Cache miss for {}", fingerprint);
        let outcome = self.aggregator.aggregate(&query).await;

        Ok(SearchResult {
            flights: filter_and_rank(&outcome.flights, &filter, sort),
            cache_hit: false,
            providers_queried: outcome.providers_queried,
            providers_succeeded: outcome.providers_succeeded,
            providers_failed: outcome.providers_failed,
        })
    }
}

fn cached_result(cached: &[Flight], filter: &FlightFilter, sort: SortOption) -> SearchResult {
    SearchResult {
        flights: filter_and_rank(cached, filter, sort),
        cache_hit: true,
        ..Default::default()
    }
}
