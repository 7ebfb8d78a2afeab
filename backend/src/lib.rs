//! # Flight Search Aggregator
//!
//! Concurrent flight search across several schema-incompatible airline
//! upstreams, merged into one canonical, filterable and ranked result set.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Canonical flight, search query and search result types
//! - [`parsing`]: Time, price, stop-count and airline-alias normalization
//! - [`providers`]: One adapter per upstream behind the [`providers::FlightProvider`] trait
//! - [`cache`]: Fingerprint-keyed TTL cache of aggregated flight lists
//! - [`services`]: Aggregation engine, filter and ranking, and the search facade
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`mock`]: Canned upstream servers for local runs and tests
//!
//! ## Request flow
//!
//! A query is validated, then looked up in the cache by fingerprint. On a miss
//! every adapter is queried in parallel under one deadline, the successes are
//! merged and cached, and the merged list is filtered and ranked for the
//! caller. A hit skips the upstream calls entirely.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod providers;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(feature = "http-server")]
pub mod mock;

pub use cache::ResultCache;
pub use error::{ConfigError, ProviderError, RecordError, SearchError};
pub use models::{Flight, SearchQuery, SearchResult, SortOption};
pub use services::FlightSearchService;
