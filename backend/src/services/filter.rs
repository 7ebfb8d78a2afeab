//! Query constraints compiled into a reusable flight predicate.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::SearchError;
use crate::models::{Flight, SearchQuery, DATE_FORMAT};
use crate::parsing::{normalize_airlines, parse_time_of_day};

/// Inclusive time-of-day window anchored on one calendar date.
///
/// The earliest bound starts at second `:00`, the latest bound runs through
/// second `:59` of its minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    earliest: Option<NaiveDateTime>,
    latest: Option<NaiveDateTime>,
}

impl TimeWindow {
    pub fn new(date: NaiveDate, earliest: Option<NaiveTime>, latest: Option<NaiveTime>) -> Self {
        Self {
            earliest: earliest.map(|t| date.and_time(t)),
            latest: latest.map(|t| date.and_time(t)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.earliest.is_none() && self.latest.is_none()
    }

    pub fn contains(&self, local: NaiveDateTime) -> bool {
        if let Some(earliest) = self.earliest {
            if local < earliest {
                return false;
            }
        }
        if let Some(latest) = self.latest {
            if local >= latest + TimeDelta::minutes(1) {
                return false;
            }
        }
        true
    }
}

/// Compiled form of a query's constraint bundle.
///
/// Built once per search so malformed inputs surface as a validation error
/// before the cache or any upstream is touched.
#[derive(Debug, Clone)]
pub struct FlightFilter {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    min_price: Option<i64>,
    max_price: Option<i64>,
    max_stops: Option<u32>,
    max_duration: Option<u32>,
    /// `None` when the caller gave no airlines. `Some` with an empty list
    /// when every supplied name was unrecognized, which matches nothing.
    airlines: Option<Vec<String>>,
    departure_window: TimeWindow,
    arrival_window: TimeWindow,
}

impl FlightFilter {
    pub fn from_query(query: &SearchQuery) -> Result<Self, SearchError> {
        let departure_date = NaiveDate::parse_from_str(query.departure_date.trim(), DATE_FORMAT)
            .map_err(|_| {
                SearchError::validation(
                    "departure_date",
                    format!("expected YYYY-MM-DD, got '{}'", query.departure_date),
                )
            })?;

        let earliest_departure = time_bound("earliest_departure", &query.earliest_departure)?;
        let latest_departure = time_bound("latest_departure", &query.latest_departure)?;
        let earliest_arrival = time_bound("earliest_arrival", &query.earliest_arrival)?;
        let latest_arrival = time_bound("latest_arrival", &query.latest_arrival)?;

        let requested: Vec<&str> = query
            .airlines
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        let airlines = (!requested.is_empty()).then(|| normalize_airlines(&requested));

        Ok(Self {
            origin: query.origin.trim().to_string(),
            destination: query.destination.trim().to_string(),
            departure_date,
            min_price: query.min_price.filter(|p| *p > 0),
            max_price: query.max_price.filter(|p| *p > 0),
            max_stops: query.max_stops,
            max_duration: query.max_duration.filter(|d| *d > 0),
            airlines,
            departure_window: TimeWindow::new(departure_date, earliest_departure, latest_departure),
            arrival_window: TimeWindow::new(departure_date, earliest_arrival, latest_arrival),
        })
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    /// Whether a single flight satisfies every constraint.
    pub fn matches(&self, flight: &Flight) -> bool {
        if !flight.origin.trim().eq_ignore_ascii_case(&self.origin)
            || !flight.destination.trim().eq_ignore_ascii_case(&self.destination)
        {
            return false;
        }
        if flight.departure_date() != self.departure_date {
            return false;
        }
        if self.min_price.is_some_and(|min| flight.price_idr < min)
            || self.max_price.is_some_and(|max| flight.price_idr > max)
        {
            return false;
        }
        if self.max_stops.is_some_and(|max| flight.stops > max) {
            return false;
        }
        if self.max_duration.is_some_and(|max| flight.duration_minutes > max) {
            return false;
        }
        if let Some(allowed) = &self.airlines {
            let code = flight.airline_code.trim();
            if !allowed.iter().any(|a| a.eq_ignore_ascii_case(code)) {
                return false;
            }
        }
        self.departure_window.contains(flight.departure_time.naive_local())
            && self.arrival_window.contains(flight.arrival_time.naive_local())
    }

    /// Keep the matching flights, preserving input order.
    pub fn apply(&self, flights: &[Flight]) -> Vec<Flight> {
        flights.iter().filter(|f| self.matches(f)).cloned().collect()
    }
}

fn time_bound(field: &str, value: &Option<String>) -> Result<Option<NaiveTime>, SearchError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_time_of_day(v)
            .map(Some)
            .map_err(|message| SearchError::validation(field, message)),
    }
}
