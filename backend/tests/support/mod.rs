#![allow(dead_code)]

use async_trait::async_trait;
use chrono::DateTime;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flight_search::error::ProviderError;
use flight_search::models::{Flight, SearchQuery};
use flight_search::providers::FlightProvider;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Flight builders
// =============================================================================

/// CGK to DPS flight; duration is derived from the two timestamps.
pub fn flight(code: &str, airline_code: &str, price: i64, stops: u32, dep: &str, arr: &str) -> Flight {
    let departure_time = DateTime::parse_from_rfc3339(dep).unwrap();
    let arrival_time = DateTime::parse_from_rfc3339(arr).unwrap();
    Flight {
        flight_code: code.to_string(),
        airline: airline_name(airline_code).to_string(),
        airline_code: airline_code.to_string(),
        origin: "CGK".to_string(),
        destination: "DPS".to_string(),
        duration_minutes: (arrival_time - departure_time).num_minutes().max(0) as u32,
        departure_time,
        arrival_time,
        stops,
        price_idr: price,
        available_seats: 20,
        aircraft: "Boeing 737-800".to_string(),
        baggage: String::new(),
        amenities: vec![],
    }
}

/// Morning flight on 2025-06-01 lasting 110 minutes.
pub fn morning(code: &str, airline_code: &str, price: i64, stops: u32) -> Flight {
    flight(
        code,
        airline_code,
        price,
        stops,
        "2025-06-01T06:00:00+07:00",
        "2025-06-01T08:50:00+08:00",
    )
}

fn airline_name(code: &str) -> &'static str {
    match code {
        "GA" => "Garuda Indonesia",
        "JT" => "Lion Air",
        "QZ" => "AirAsia",
        "ID" => "Batik Air",
        _ => "Unknown",
    }
}

pub fn cgk_dps() -> SearchQuery {
    SearchQuery::new("CGK", "DPS", "2025-06-01")
}

pub fn codes(flights: &[Flight]) -> Vec<String> {
    flights.iter().map(|f| f.flight_code.clone()).collect()
}

// =============================================================================
// In-memory providers
// =============================================================================

/// Provider that answers every query with the same scripted outcome.
pub struct ScriptedProvider {
    name: String,
    delay: Duration,
    response: Result<Vec<Flight>, String>,
    calls: AtomicUsize,
    dates: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn ok(name: &str, flights: Vec<Flight>) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::ZERO,
            response: Ok(flights),
            calls: AtomicUsize::new(0),
            dates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::ZERO,
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            dates: Mutex::new(Vec::new()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Departure dates this provider was asked for, in call order.
    pub fn dates(&self) -> Vec<String> {
        self.dates.lock().unwrap().clone()
    }
}

#[async_trait]
impl FlightProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dates.lock().unwrap().push(query.departure_date.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response
            .clone()
            .map_err(|message| ProviderError::upstream(self.name.clone(), message))
    }
}

/// Provider whose task panics mid-call.
pub struct PanickingProvider;

#[async_trait]
impl FlightProvider for PanickingProvider {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        panic!("upstream adapter bug");
    }
}

pub fn registry(providers: &[Arc<ScriptedProvider>]) -> Vec<Arc<dyn FlightProvider>> {
    providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn FlightProvider>)
        .collect()
}
