//! Concurrent fan-out to every registered upstream adapter.
//!
//! One tokio task is spawned per adapter. The orchestrating future awaits
//! each join handle bounded by a single shared deadline; a handle that misses
//! it is dropped, which detaches the task so its late result is never merged.

use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::cache::ResultCache;
use crate::models::{Flight, SearchQuery};
use crate::providers::FlightProvider;

pub const DEFAULT_AGGREGATION_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(180);

/// Merged flights and per-source counters of one aggregation.
#[derive(Debug, Clone)]
pub struct AggregationOutcome {
    pub flights: Arc<[Flight]>,
    pub providers_queried: usize,
    pub providers_succeeded: usize,
    pub providers_failed: usize,
}

/// Outcome of one adapter task as seen by the orchestrator.
enum ProviderOutcome {
    Flights(Vec<Flight>),
    Failed(String),
}

pub struct Aggregator {
    providers: Vec<Arc<dyn FlightProvider>>,
    cache: Arc<ResultCache>,
    timeout: Duration,
    cache_ttl: Duration,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn FlightProvider>>, cache: Arc<ResultCache>) -> Self {
        Self {
            providers,
            cache,
            timeout: DEFAULT_AGGREGATION_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn providers(&self) -> &[Arc<dyn FlightProvider>] {
        &self.providers
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Aggregate with a deadline of `now + timeout`.
    pub async fn aggregate(&self, query: &SearchQuery) -> AggregationOutcome {
        self.aggregate_until(query, Instant::now() + self.timeout).await
    }

    /// Query every adapter concurrently and merge the successes.
    ///
    /// Never fails: a failing, panicking or late adapter only raises
    /// `providers_failed`. The merged list is written to the cache under the
    /// query fingerprint before returning, even when it is empty.
    pub async fn aggregate_until(
        &self,
        query: &SearchQuery,
        deadline: Instant,
    ) -> AggregationOutcome {
        let started = Instant::now();
        let shared_query = Arc::new(query.clone());

        let calls = self.providers.iter().map(|provider| {
            let name = provider.name().to_string();
            let provider = Arc::clone(provider);
            let query = Arc::clone(&shared_query);
            let handle = tokio::spawn(async move { provider.search(&query).await });

            async move {
                let outcome = match timeout_at(deadline, handle).await {
                    Ok(Ok(Ok(flights))) => ProviderOutcome::Flights(flights),
                    Ok(Ok(Err(e))) => ProviderOutcome::Failed(e.to_string()),
                    Ok(Err(join_err)) => {
                        ProviderOutcome::Failed(format!("task failed: {}", join_err))
                    }
                    Err(_) => ProviderOutcome::Failed("deadline exceeded".to_string()),
                };
                (name, outcome)
            }
        });

        let results = join_all(calls).await;

        let mut merged = Vec::new();
        let mut succeeded = 0;
        let mut failed = 0;
        for (name, outcome) in results {
            match outcome {
                ProviderOutcome::Flights(flights) => {
                    succeeded += 1;
                    let received = flights.len();
                    merged.extend(flights.into_iter().filter(Flight::is_valid));
                    debug!("{} returned {} flights", name, received);
                }
                ProviderOutcome::Failed(reason) => {
                    failed += 1;
                    warn!("Provider {} failed: {}", name, reason);
                }
            }
        }

        let flights: Arc<[Flight]> = merged.into();
        self.cache.put(query.fingerprint(), Arc::clone(&flights), self.cache_ttl);

        info!(
            "Aggregated {} flights for {} from {}/{} providers in {:?}",
            flights.len(),
            query.fingerprint(),
            succeeded,
            self.providers.len(),
            started.elapsed()
        );

        AggregationOutcome {
            flights,
            providers_queried: self.providers.len(),
            providers_succeeded: succeeded,
            providers_failed: failed,
        }
    }
}
