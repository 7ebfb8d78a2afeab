//! HTTP handlers for the REST API.

use axum::{
    extract::{Query, State},
    Json,
};
use log::info;
use std::time::Instant;

use super::dto::{parse_search_params, HealthResponse, SearchResponse};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        providers: state.search.provider_count(),
    })
}

// =============================================================================
// Search
// =============================================================================

/// GET /search
///
/// Search all upstream sources for one route and date, then filter and rank.
pub async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> HandlerResult<SearchResponse> {
    let start = Instant::now();
    let query = parse_search_params(&params)?;

    let result = state.search.search(&query).await?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    info!(
        "Search {} sorted by {} returned {} flights in {}ms (cache_hit={})",
        query.fingerprint(),
        query.sort_option(),
        result.flights.len(),
        elapsed_ms,
        result.cache_hit
    );

    Ok(Json(SearchResponse::new(&query, result, elapsed_ms)))
}
