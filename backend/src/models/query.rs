//! Search query, sort options and search results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::flight::Flight;

/// Default cabin class when the caller does not supply one.
pub const DEFAULT_CABIN_CLASS: &str = "economy";

/// Layout of `departure_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One structured search request.
///
/// Origin, destination, departure date, cabin class and passenger count form
/// the cache identity; everything else only shapes filtering and ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    /// Calendar date, `YYYY-MM-DD`
    pub departure_date: String,
    pub passengers: u32,
    pub cabin_class: String,

    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
    /// `None` means no constraint; `Some(0)` means direct flights only
    #[serde(default)]
    pub max_stops: Option<u32>,
    /// Minutes
    #[serde(default)]
    pub max_duration: Option<u32>,
    /// Free-form airline names or codes, resolved through the alias table
    #[serde(default)]
    pub airlines: Vec<String>,
    /// `HH:MM`
    #[serde(default)]
    pub earliest_departure: Option<String>,
    #[serde(default)]
    pub latest_departure: Option<String>,
    #[serde(default)]
    pub earliest_arrival: Option<String>,
    #[serde(default)]
    pub latest_arrival: Option<String>,

    #[serde(default)]
    pub sort_by: Option<String>,
}

impl SearchQuery {
    /// Create a query for one passenger in economy with no constraints.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            passengers: 1,
            cabin_class: DEFAULT_CABIN_CLASS.to_string(),
            min_price: None,
            max_price: None,
            max_stops: None,
            max_duration: None,
            airlines: Vec::new(),
            earliest_departure: None,
            latest_departure: None,
            earliest_arrival: None,
            latest_arrival: None,
            sort_by: None,
        }
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_cabin_class(mut self, cabin_class: impl Into<String>) -> Self {
        self.cabin_class = cabin_class.into();
        self
    }

    pub fn with_max_stops(mut self, max_stops: u32) -> Self {
        self.max_stops = Some(max_stops);
        self
    }

    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_airlines<I, S>(mut self, airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines = airlines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Cache key for this query.
    ///
    /// Fields are joined in a fixed order (`origin|destination|date|cabin|passengers`),
    /// trimmed and upper-cased, so the key only depends on the cache-relevant subset.
    /// A parseable date is rewritten as zero-padded `YYYY-MM-DD`.
    pub fn fingerprint(&self) -> String {
        let passengers = self.passengers.to_string();
        [
            self.origin.trim().to_uppercase(),
            self.destination.trim().to_uppercase(),
            self.canonical_date(),
            self.cabin_class.trim().to_uppercase(),
            passengers,
        ]
        .join("|")
    }

    /// Copy of this query with the departure date in canonical form, as sent
    /// to the upstreams.
    pub fn normalized(&self) -> Self {
        Self {
            departure_date: self.canonical_date(),
            ..self.clone()
        }
    }

    fn canonical_date(&self) -> String {
        let raw = self.departure_date.trim();
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => date.format(DATE_FORMAT).to_string(),
            Err(_) => raw.to_string(),
        }
    }

    /// Ranking rule requested by the caller, falling back to best value.
    pub fn sort_option(&self) -> SortOption {
        self.sort_by
            .as_deref()
            .map(SortOption::parse_lenient)
            .unwrap_or_default()
    }
}

/// Ranking rule for a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    DurationAsc,
    DurationDesc,
    DepartureAsc,
    ArrivalAsc,
    #[default]
    BestValue,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::DurationAsc => "duration_asc",
            Self::DurationDesc => "duration_desc",
            Self::DepartureAsc => "departure_asc",
            Self::ArrivalAsc => "arrival_asc",
            Self::BestValue => "best_value",
        }
    }

    /// Parse a sort key, treating anything unknown as [`SortOption::BestValue`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "duration_asc" => Ok(Self::DurationAsc),
            "duration_desc" => Ok(Self::DurationDesc),
            "departure_asc" => Ok(Self::DepartureAsc),
            "arrival_asc" => Ok(Self::ArrivalAsc),
            "best_value" => Ok(Self::BestValue),
            other => Err(format!("Unknown sort option: {}", other)),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one search through the query facade.
///
/// Source counters are zero when the result came from the cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub flights: Vec<Flight>,
    pub cache_hit: bool,
    pub providers_queried: usize,
    pub providers_succeeded: usize,
    pub providers_failed: usize,
}
