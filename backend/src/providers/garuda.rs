//! Garuda Indonesia adapter.
//!
//! Envelope: `{"status": "success", "flights": [...]}` with nested departure,
//! arrival, price and baggage objects.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::{map_records, HttpUpstream};
use super::FlightProvider;
use crate::error::{ProviderError, RecordError};
use crate::models::{Flight, SearchQuery};
use crate::parsing::{parse_flexible_time, parse_price, reconcile_stops};

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct GarudaResponse {
    status: String,
    #[serde(default)]
    flights: Vec<GarudaFlight>,
}

#[derive(Debug, Deserialize)]
struct GarudaFlight {
    flight_id: String,
    #[serde(default)]
    airline: String,
    airline_code: String,
    departure: GarudaLocation,
    arrival: GarudaLocation,
    #[serde(default)]
    duration_minutes: u32,
    #[serde(default)]
    stops: Option<u32>,
    #[serde(default)]
    aircraft: String,
    price: GarudaPrice,
    #[serde(default)]
    segments: Vec<Value>,
    #[serde(default)]
    available_seats: u32,
    #[serde(default)]
    baggage: Option<GarudaBaggage>,
    #[serde(default)]
    amenities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GarudaLocation {
    airport: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct GarudaPrice {
    #[serde(default)]
    amount: Value,
}

#[derive(Debug, Deserialize)]
struct GarudaBaggage {
    #[serde(default)]
    carry_on: u32,
    #[serde(default)]
    checked: u32,
}

pub struct GarudaProvider {
    upstream: HttpUpstream,
}

impl GarudaProvider {
    pub const SLUG: &'static str = "garuda";

    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: HttpUpstream::new(base_url, Self::SLUG, client),
        }
    }
}

#[async_trait]
impl FlightProvider for GarudaProvider {
    fn name(&self) -> &str {
        "Garuda Indonesia"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        let raw: GarudaResponse = self.upstream.fetch(self.name(), query).await?;
        parse_response(self.name(), raw)
    }
}

fn parse_response(provider: &str, raw: GarudaResponse) -> Result<Vec<Flight>, ProviderError> {
    if raw.status != STATUS_SUCCESS {
        return Err(ProviderError::upstream(provider, format!("status={}", raw.status)));
    }
    Ok(map_records(provider, raw.flights, map_flight))
}

fn map_flight(r: GarudaFlight) -> Result<Flight, RecordError> {
    let departure_time = parse_flexible_time(&r.departure.time)?;
    let arrival_time = parse_flexible_time(&r.arrival.time)?;
    let price_idr = parse_price(&r.price.amount)?;

    // Segment lists count legs, so one connection means two segments.
    let segment_stops = (r.segments.len() > 1).then(|| r.segments.len() as u32 - 1);
    let explicit_stops = match (r.stops, segment_stops) {
        (Some(stops), Some(from_segments)) => Some(stops.max(from_segments)),
        (stops, from_segments) => stops.or(from_segments),
    };

    let baggage = r
        .baggage
        .map(|b| format!("{} cabin, {} checked", b.carry_on, b.checked))
        .unwrap_or_default();

    Ok(Flight {
        flight_code: r.flight_id,
        airline: r.airline,
        airline_code: r.airline_code.trim().to_uppercase(),
        origin: r.departure.airport,
        destination: r.arrival.airport,
        departure_time,
        arrival_time,
        duration_minutes: r.duration_minutes,
        stops: reconcile_stops(None, explicit_stops),
        price_idr,
        available_seats: r.available_seats,
        aircraft: r.aircraft,
        baggage,
        amenities: r.amenities,
    })
}
