//! In-memory result cache keyed by query fingerprint.
//!
//! Entries hold the unfiltered, merged flight list of one aggregation. Expiry
//! is lazy: an entry past its deadline reads as absent but stays in the map
//! until the same key is written again.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::Flight;

#[derive(Debug, Clone)]
struct CacheEntry {
    flights: Arc<[Flight]>,
    expires_at: Instant,
}

/// Thread-safe TTL cache of aggregated flight lists.
///
/// Readers share the lock; a write takes it exclusively and swaps the whole
/// entry, so a concurrent reader sees either the old list or the new one.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fingerprint, returning `None` for missing or expired entries.
    pub fn get(&self, fingerprint: &str) -> Option<Arc<[Flight]>> {
        let entries = self.entries.read();
        let entry = entries.get(fingerprint)?;
        if Instant::now() >= entry.expires_at {
            return None;
        }
        Some(Arc::clone(&entry.flights))
    }

    /// Store a flight list that stays readable for `ttl`.
    pub fn put(
        &self,
        fingerprint: impl Into<String>,
        flights: impl Into<Arc<[Flight]>>,
        ttl: Duration,
    ) {
        let entry = CacheEntry {
            flights: flights.into(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(fingerprint.into(), entry);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn flight(code: &str) -> Flight {
        Flight {
            flight_code: code.to_string(),
            airline: "Lion Air".to_string(),
            airline_code: "JT".to_string(),
            origin: "CGK".to_string(),
            destination: "DPS".to_string(),
            departure_time: DateTime::parse_from_rfc3339("2025-06-01T05:30:00+07:00").unwrap(),
            arrival_time: DateTime::parse_from_rfc3339("2025-06-01T08:15:00+08:00").unwrap(),
            duration_minutes: 105,
            stops: 0,
            price_idr: 950_000,
            available_seats: 45,
            aircraft: "Boeing 737-900ER".to_string(),
            baggage: String::new(),
            amenities: vec![],
        }
    }

    #[test]
    fn test_get_missing() {
        let cache = ResultCache::new();
        assert!(cache.get("CGK|DPS|2025-06-01|ECONOMY|1").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let cache = ResultCache::new();
        cache.put("k", vec![flight("JT25"), flight("JT34")], Duration::from_secs(60));

        let flights = cache.get("k").unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].flight_code, "JT25");
    }

    #[test]
    fn test_empty_list_is_a_hit() {
        let cache = ResultCache::new();
        cache.put("k", Vec::<Flight>::new(), Duration::from_secs(60));
        assert_eq!(cache.get("k").map(|f| f.len()), Some(0));
    }

    #[test]
    fn test_expired_entry_reads_as_absent() {
        let cache = ResultCache::new();
        cache.put("k", vec![flight("JT25")], Duration::from_millis(20));
        assert!(cache.get("k").is_some());

        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get("k").is_none());
        // Lazy expiry keeps the slot until it is overwritten
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_list_and_expiry() {
        let cache = ResultCache::new();
        cache.put("k", vec![flight("JT25")], Duration::from_millis(10));
        cache.put("k", vec![flight("JT34"), flight("JT36")], Duration::from_secs(60));

        std::thread::sleep(Duration::from_millis(20));
        let flights = cache.get("k").unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let cache = Arc::new(ResultCache::new());

        std::thread::scope(|scope| {
            for writer in 0..4 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..200 {
                        let size = (writer + i) % 3 + 1;
                        let flights: Vec<Flight> =
                            (0..size).map(|n| flight(&format!("JT{}", n))).collect();
                        cache.put("shared", flights, Duration::from_secs(60));
                    }
                });
            }
            for _ in 0..4 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for _ in 0..200 {
                        if let Some(flights) = cache.get("shared") {
                            // A write never leaves a partially built list behind
                            assert!((1..=3).contains(&flights.len()));
                            for (n, f) in flights.iter().enumerate() {
                                assert_eq!(f.flight_code, format!("JT{}", n));
                            }
                        }
                    }
                });
            }
        });

        assert_eq!(cache.len(), 1);
    }
}
