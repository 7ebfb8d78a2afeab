//! Data Transfer Objects for the HTTP API.
//!
//! `/search` parameters arrive as raw key/value pairs so that `airlines` can be
//! given both as a comma-separated list and as a repeated parameter.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::AppError;
use crate::models::{Flight, SearchQuery, SearchResult, DEFAULT_CABIN_CLASS};

/// Echo of the cache-relevant query fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub passengers: u32,
    pub cabin_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_results: usize,
    pub providers_queried: usize,
    pub providers_succeeded: usize,
    pub providers_failed: usize,
    pub search_time_ms: u64,
    pub cache_hit: bool,
}

/// Response body for `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_criteria: SearchCriteria,
    pub metadata: SearchMetadata,
    pub flights: Vec<Flight>,
}

impl SearchResponse {
    pub fn new(query: &SearchQuery, result: SearchResult, search_time_ms: u64) -> Self {
        Self {
            search_criteria: SearchCriteria {
                origin: query.origin.clone(),
                destination: query.destination.clone(),
                departure_date: query.departure_date.clone(),
                passengers: query.passengers,
                cabin_class: query.cabin_class.clone(),
            },
            metadata: SearchMetadata {
                total_results: result.flights.len(),
                providers_queried: result.providers_queried,
                providers_succeeded: result.providers_succeeded,
                providers_failed: result.providers_failed,
                search_time_ms,
                cache_hit: result.cache_hit,
            },
            flights: result.flights,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of registered upstream adapters
    pub providers: usize,
}

/// Decode `/search` query-string pairs into a [`SearchQuery`].
///
/// The first non-blank value of a scalar parameter wins. Required parameters
/// are `origin`, `destination` and `departure_date`; a numeric parameter that
/// does not parse is rejected rather than ignored.
pub fn parse_search_params(pairs: &[(String, String)]) -> Result<SearchQuery, AppError> {
    let mut missing = Vec::new();
    let origin = required(pairs, "origin", &mut missing);
    let destination = required(pairs, "destination", &mut missing);
    let departure_date = required(pairs, "departure_date", &mut missing);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "missing required query parameters: {}",
            missing.join(", ")
        )));
    }

    let passengers = number::<u32>(pairs, "passengers")?.unwrap_or(1);
    if passengers == 0 {
        return Err(AppError::BadRequest("passengers must be at least 1".to_string()));
    }

    let mut query = SearchQuery::new(origin, destination, departure_date)
        .with_passengers(passengers)
        .with_cabin_class(first(pairs, "cabin_class").unwrap_or(DEFAULT_CABIN_CLASS));

    query.min_price = number(pairs, "min_price")?;
    query.max_price = number(pairs, "max_price")?;
    query.max_stops = number(pairs, "max_stops")?;
    query.max_duration = number(pairs, "max_duration")?;
    query.airlines = pairs
        .iter()
        .filter(|(k, _)| k == "airlines")
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    query.earliest_departure = first(pairs, "earliest_departure").map(str::to_string);
    query.latest_departure = first(pairs, "latest_departure").map(str::to_string);
    query.earliest_arrival = first(pairs, "earliest_arrival").map(str::to_string);
    query.latest_arrival = first(pairs, "latest_arrival").map(str::to_string);
    query.sort_by = first(pairs, "sort_by").map(str::to_string);

    Ok(query)
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .find(|v| !v.is_empty())
}

fn required(
    pairs: &[(String, String)],
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match first(pairs, key) {
        Some(v) => v.to_string(),
        None => {
            missing.push(key);
            String::new()
        }
    }
}

fn number<T: FromStr>(pairs: &[(String, String)], key: &str) -> Result<Option<T>, AppError> {
    first(pairs, key)
        .map(|v| {
            v.parse::<T>().map_err(|_| {
                AppError::BadRequest(format!(
                    "{} must be an integer, got '{}'",
                    key, v
                ))
            })
        })
        .transpose()
}
