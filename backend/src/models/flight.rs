//! Canonical flight representation.
//!
//! Every upstream adapter maps its native schema into [`Flight`]; the cache,
//! the aggregation engine and the filter/rank stage only ever see this type.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One bookable itinerary, normalized across sources.
///
/// Departure and arrival keep the UTC offset they were resolved with so the
/// flight's local calendar date and wall-clock time can be recovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_code: String,
    pub airline: String,
    /// IATA-style carrier code, used by the airline allow-list filter
    pub airline_code: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    pub duration_minutes: u32,
    pub stops: u32,
    /// Price in the reporting currency (IDR, whole units)
    pub price_idr: i64,
    pub available_seats: u32,
    #[serde(default)]
    pub aircraft: String,
    #[serde(default)]
    pub baggage: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Flight {
    /// Whether arrival is strictly after departure.
    ///
    /// Flights failing this check are never valid members of a result set.
    pub fn is_valid(&self) -> bool {
        self.arrival_time > self.departure_time
    }

    /// Calendar date of departure in the flight's own timezone.
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_time.date_naive()
    }

    /// Composite ranking score, lower is better.
    pub fn best_value_score(&self) -> i64 {
        self.price_idr / 10_000 + i64::from(self.duration_minutes) + 100 * i64::from(self.stops)
    }
}
