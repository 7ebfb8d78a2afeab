//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::FlightSearchService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<FlightSearchService>,
}

impl AppState {
    pub fn new(search: Arc<FlightSearchService>) -> Self {
        Self { search }
    }
}
