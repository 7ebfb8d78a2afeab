//! HTTP front door for the flight search service.
//!
//! This module exposes [`crate::services::FlightSearchService`] as a small
//! REST API built on axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Query-string decoding and validation                  │
//! │  - JSON response encoding                                │
//! │  - CORS, compression, tracing, error mapping             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Query Facade (services::search)                         │
//! │  - Cache lookup, aggregation, filter and rank            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Upstream adapters (providers/)                          │
//! │  - AirAsia / Batik Air / Garuda Indonesia / Lion Air     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
