//! Result ordering.

use std::cmp::Reverse;

use super::filter::FlightFilter;
use crate::error::SearchError;
use crate::models::{Flight, SearchQuery, SortOption};

/// Order flights in place by a single key.
///
/// Uses a stable sort, so flights with equal keys keep their input order.
pub fn sort_flights(flights: &mut [Flight], sort: SortOption) {
    match sort {
        SortOption::PriceAsc => flights.sort_by_key(|f| f.price_idr),
        SortOption::PriceDesc => flights.sort_by_key(|f| Reverse(f.price_idr)),
        SortOption::DurationAsc => flights.sort_by_key(|f| f.duration_minutes),
        SortOption::DurationDesc => flights.sort_by_key(|f| Reverse(f.duration_minutes)),
        SortOption::DepartureAsc => flights.sort_by_key(|f| f.departure_time),
        SortOption::ArrivalAsc => flights.sort_by_key(|f| f.arrival_time),
        SortOption::BestValue => flights.sort_by_key(Flight::best_value_score),
    }
}

pub fn filter_and_rank(flights: &[Flight], filter: &FlightFilter, sort: SortOption) -> Vec<Flight> {
    let mut kept = filter.apply(flights);
    sort_flights(&mut kept, sort);
    kept
}

/// Filter and order a flight list against a query.
pub fn apply(flights: &[Flight], query: &SearchQuery) -> Result<Vec<Flight>, SearchError> {
    let filter = FlightFilter::from_query(query)?;
    Ok(filter_and_rank(flights, &filter, query.sort_option()))
}
