//! AirAsia adapter.
//!
//! Envelope: `{"status": "ok", "flights": [...]}`. Durations come in fractional
//! hours and the carrier code is the flight code's two-letter prefix.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::{map_records, HttpUpstream};
use super::FlightProvider;
use crate::error::{ProviderError, RecordError};
use crate::models::{Flight, SearchQuery};
use crate::parsing::{parse_flexible_time, parse_price, reconcile_stops};

const STATUS_OK: &str = "ok";

#[derive(Debug, Deserialize)]
struct AirAsiaResponse {
    status: String,
    #[serde(default)]
    flights: Vec<AirAsiaFlight>,
}

#[derive(Debug, Deserialize)]
struct AirAsiaFlight {
    flight_code: String,
    #[serde(default)]
    airline: String,
    from_airport: String,
    to_airport: String,
    depart_time: String,
    arrive_time: String,
    #[serde(default)]
    duration_hours: f64,
    #[serde(default)]
    direct_flight: Option<bool>,
    #[serde(default)]
    stops: Vec<Value>,
    #[serde(default)]
    price_idr: Value,
    #[serde(default)]
    seats: u32,
    #[serde(default)]
    baggage_note: String,
}

pub struct AirAsiaProvider {
    upstream: HttpUpstream,
}

impl AirAsiaProvider {
    pub const SLUG: &'static str = "airasia";

    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: HttpUpstream::new(base_url, Self::SLUG, client),
        }
    }
}

#[async_trait]
impl FlightProvider for AirAsiaProvider {
    fn name(&self) -> &str {
        "AirAsia"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        let raw: AirAsiaResponse = self.upstream.fetch(self.name(), query).await?;
        parse_response(self.name(), raw)
    }
}

fn parse_response(provider: &str, raw: AirAsiaResponse) -> Result<Vec<Flight>, ProviderError> {
    if raw.status != STATUS_OK {
        return Err(ProviderError::upstream(provider, format!("status={}", raw.status)));
    }
    Ok(map_records(provider, raw.flights, map_flight))
}

fn map_flight(r: AirAsiaFlight) -> Result<Flight, RecordError> {
    let departure_time = parse_flexible_time(&r.depart_time)?;
    let arrival_time = parse_flexible_time(&r.arrive_time)?;
    let price_idr = parse_price(&r.price_idr)?;

    let airline_code = r
        .flight_code
        .get(..2)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_alphanumeric()))
        .ok_or(RecordError::MissingField("flight_code"))?
        .to_uppercase();

    let layovers = (!r.stops.is_empty()).then_some(r.stops.len() as u32);

    Ok(Flight {
        airline_code,
        airline: r.airline,
        origin: r.from_airport,
        destination: r.to_airport,
        departure_time,
        arrival_time,
        duration_minutes: (r.duration_hours * 60.0).round().max(0.0) as u32,
        stops: reconcile_stops(r.direct_flight, layovers),
        price_idr,
        available_seats: r.seats,
        aircraft: String::new(),
        baggage: r.baggage_note,
        amenities: Vec::new(),
        flight_code: r.flight_code,
    })
}
