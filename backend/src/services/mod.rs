//! Service layer for aggregation and query orchestration.
//!
//! [`search::FlightSearchService`] is the only entry point the HTTP layer
//! calls. It sits on top of the [`aggregator::Aggregator`] (fan-out to the
//! upstream adapters) and the pure filter and ranking stage.

pub mod aggregator;
pub mod filter;
pub mod ranking;
pub mod search;

pub use aggregator::{
    AggregationOutcome, Aggregator, DEFAULT_AGGREGATION_TIMEOUT, DEFAULT_CACHE_TTL,
};
pub use filter::{FlightFilter, TimeWindow};
pub use ranking::{apply, filter_and_rank, sort_flights};
pub use search::FlightSearchService;
