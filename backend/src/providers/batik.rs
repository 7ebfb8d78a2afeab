//! Batik Air adapter.
//!
//! Envelope: `{"code": 200, "message": "...", "results": [...]}`. Duration is
//! derived from the resolved departure and arrival instants.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::{map_records, minutes_between, HttpUpstream};
use super::FlightProvider;
use crate::error::{ProviderError, RecordError};
use crate::models::{Flight, SearchQuery};
use crate::parsing::{parse_flexible_time, parse_price, reconcile_stops};

const CODE_SUCCESS: i64 = 200;

#[derive(Debug, Deserialize)]
struct BatikResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    results: Vec<BatikFlight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatikFlight {
    flight_number: String,
    #[serde(default)]
    airline_name: String,
    #[serde(rename = "airlineIATA")]
    airline_iata: String,
    origin: String,
    destination: String,
    departure_date_time: String,
    arrival_date_time: String,
    #[serde(default)]
    number_of_stops: u32,
    #[serde(default)]
    connections: Vec<Value>,
    fare: BatikFare,
    #[serde(default)]
    seats_available: u32,
    #[serde(default)]
    aircraft_model: String,
    #[serde(default)]
    baggage_info: String,
    #[serde(default)]
    onboard_services: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatikFare {
    #[serde(default)]
    total_price: Value,
}

pub struct BatikProvider {
    upstream: HttpUpstream,
}

impl BatikProvider {
    pub const SLUG: &'static str = "batik";

    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: HttpUpstream::new(base_url, Self::SLUG, client),
        }
    }
}

#[async_trait]
impl FlightProvider for BatikProvider {
    fn name(&self) -> &str {
        "Batik Air"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        let raw: BatikResponse = self.upstream.fetch(self.name(), query).await?;
        parse_response(self.name(), raw)
    }
}

fn parse_response(provider: &str, raw: BatikResponse) -> Result<Vec<Flight>, ProviderError> {
    if raw.code != CODE_SUCCESS {
        return Err(ProviderError::upstream(
            provider,
            format!("code={} message={}", raw.code, raw.message),
        ));
    }
    Ok(map_records(provider, raw.results, map_flight))
}

fn map_flight(r: BatikFlight) -> Result<Flight, RecordError> {
    let departure_time = parse_flexible_time(&r.departure_date_time)?;
    let arrival_time = parse_flexible_time(&r.arrival_date_time)?;
    let price_idr = parse_price(&r.fare.total_price)?;
    let explicit_stops = r.number_of_stops.max(r.connections.len() as u32);

    Ok(Flight {
        flight_code: r.flight_number,
        airline: r.airline_name,
        airline_code: r.airline_iata.trim().to_uppercase(),
        origin: r.origin,
        destination: r.destination,
        duration_minutes: minutes_between(&departure_time, &arrival_time),
        departure_time,
        arrival_time,
        stops: reconcile_stops(None, Some(explicit_stops)),
        price_idr,
        available_seats: r.seats_available,
        aircraft: r.aircraft_model,
        baggage: r.baggage_info,
        amenities: r.onboard_services,
    })
}
