//! Domain models shared by the adapters, the engine and the HTTP layer.

pub mod flight;
pub mod query;

pub use flight::Flight;
pub use query::{SearchQuery, SearchResult, SortOption, DATE_FORMAT, DEFAULT_CABIN_CLASS};
