//! Lion Air adapter.
//!
//! Envelope: `{"success": true, "data": {"available_flights": [...]}}`.
//! Timestamps are naive and resolved through the IANA zone carried next to
//! each one in the schedule block.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::{map_records, HttpUpstream};
use super::FlightProvider;
use crate::error::{ProviderError, RecordError};
use crate::models::{Flight, SearchQuery};
use crate::parsing::{parse_price, parse_time_with_tz, reconcile_stops};

#[derive(Debug, Deserialize)]
struct LionResponse {
    success: bool,
    #[serde(default)]
    data: LionData,
}

#[derive(Debug, Default, Deserialize)]
struct LionData {
    #[serde(default)]
    available_flights: Vec<LionFlight>,
}

#[derive(Debug, Deserialize)]
struct LionFlight {
    id: String,
    carrier: LionCarrier,
    route: LionRoute,
    schedule: LionSchedule,
    #[serde(default)]
    flight_time: u32,
    #[serde(default)]
    is_direct: Option<bool>,
    #[serde(default)]
    stop_count: Option<u32>,
    #[serde(default)]
    layovers: Vec<Value>,
    pricing: LionPricing,
    #[serde(default)]
    seats_left: u32,
    #[serde(default)]
    plane_type: String,
    #[serde(default)]
    services: LionServices,
}

#[derive(Debug, Deserialize)]
struct LionCarrier {
    #[serde(default)]
    name: String,
    iata: String,
}

#[derive(Debug, Deserialize)]
struct LionRoute {
    from: LionAirport,
    to: LionAirport,
}

#[derive(Debug, Deserialize)]
struct LionAirport {
    code: String,
}

#[derive(Debug, Deserialize)]
struct LionSchedule {
    departure: String,
    departure_timezone: String,
    arrival: String,
    arrival_timezone: String,
}

#[derive(Debug, Deserialize)]
struct LionPricing {
    #[serde(default)]
    total: Value,
}

#[derive(Debug, Default, Deserialize)]
struct LionServices {
    #[serde(default)]
    wifi_available: bool,
    #[serde(default)]
    meals_included: bool,
    #[serde(default)]
    baggage_allowance: Option<LionBaggage>,
}

#[derive(Debug, Deserialize)]
struct LionBaggage {
    #[serde(default)]
    cabin: String,
    #[serde(default)]
    hold: String,
}

pub struct LionAirProvider {
    upstream: HttpUpstream,
}

impl LionAirProvider {
    pub const SLUG: &'static str = "lion";

    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: HttpUpstream::new(base_url, Self::SLUG, client),
        }
    }
}

#[async_trait]
impl FlightProvider for LionAirProvider {
    fn name(&self) -> &str {
        "Lion Air"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Flight>, ProviderError> {
        let raw: LionResponse = self.upstream.fetch(self.name(), query).await?;
        parse_response(self.name(), raw)
    }
}

fn parse_response(provider: &str, raw: LionResponse) -> Result<Vec<Flight>, ProviderError> {
    if !raw.success {
        return Err(ProviderError::upstream(provider, "success=false"));
    }
    Ok(map_records(provider, raw.data.available_flights, map_flight))
}

fn map_flight(r: LionFlight) -> Result<Flight, RecordError> {
    let departure_time =
        parse_time_with_tz(&r.schedule.departure, &r.schedule.departure_timezone)?;
    let arrival_time = parse_time_with_tz(&r.schedule.arrival, &r.schedule.arrival_timezone)?;
    let price_idr = parse_price(&r.pricing.total)?;

    let explicit_stops = r
        .stop_count
        .or_else(|| (!r.layovers.is_empty()).then_some(r.layovers.len() as u32));

    let mut amenities = Vec::new();
    if r.services.wifi_available {
        amenities.push("wifi".to_string());
    }
    if r.services.meals_included {
        amenities.push("meal".to_string());
    }

    let baggage = r
        .services
        .baggage_allowance
        .map(|b| format!("{} cabin, {} checked", b.cabin, b.hold))
        .unwrap_or_default();

    Ok(Flight {
        flight_code: r.id,
        airline: r.carrier.name,
        airline_code: r.carrier.iata.trim().to_uppercase(),
        origin: r.route.from.code,
        destination: r.route.to.code,
        departure_time,
        arrival_time,
        duration_minutes: r.flight_time,
        stops: reconcile_stops(r.is_direct, explicit_stops),
        price_idr,
        available_seats: r.seats_left,
        aircraft: r.plane_type,
        baggage,
        amenities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn decode(body: &str) -> Result<Vec<Flight>, ProviderError> {
        let raw: LionResponse = serde_json::from_str(body).unwrap();
        parse_response("Lion Air", raw)
    }

    const ONE_FLIGHT: &str = r#"{"success":true,"data":{"available_flights":[
        {"id":"JT740","carrier":{"name":"Lion Air","iata":"JT"},
         "route":{"from":{"code":"CGK","name":"Soekarno-Hatta","city":"Jakarta"},
                  "to":{"code":"DPS","name":"Ngurah Rai","city":"Denpasar"}},
         "schedule":{"departure":"2025-06-01T05:30:00","departure_timezone":"Asia/Jakarta",
                     "arrival":"2025-06-01T08:15:00","arrival_timezone":"Asia/Makassar"},
         "flight_time":105,"is_direct":true,
         "pricing":{"total":950000,"currency":"IDR","fare_type":"ECONOMY"},
         "seats_left":45,"plane_type":"Boeing 737-900ER",
         "services":{"wifi_available":false,"meals_included":true,
                     "baggage_allowance":{"cabin":"7 kg","hold":"20 kg"}}}
    ]}}"#;

    #[test]
    fn test_resolves_named_timezones() {
        let flights = decode(ONE_FLIGHT).unwrap();
        let f = &flights[0];
        assert_eq!(f.departure_time.offset().local_minus_utc(), 7 * 3600);
        assert_eq!(f.arrival_time.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(f.departure_time.hour(), 5);
        assert!(f.is_valid());
    }

    #[test]
    fn test_services_become_amenities_and_baggage() {
        let flights = decode(ONE_FLIGHT).unwrap();
        assert_eq!(flights[0].amenities, vec!["meal"]);
        assert_eq!(flights[0].baggage, "7 kg cabin, 20 kg checked");
        assert_eq!(flights[0].stops, 0);
    }

    #[test]
    fn test_unknown_timezone_skips_record() {
        let body = ONE_FLIGHT.replace("Asia/Makassar", "Asia/Atlantis");
        let flights = decode(&body).unwrap();
        assert!(flights.is_empty());
    }

    #[test]
    fn test_non_direct_uses_stop_count() {
        let body = ONE_FLIGHT.replace(r#""is_direct":true"#, r#""is_direct":false,"stop_count":2"#);
        assert_eq!(decode(&body).unwrap()[0].stops, 2);

        let body = ONE_FLIGHT.replace(r#""is_direct":true"#, r#""is_direct":false"#);
        assert_eq!(decode(&body).unwrap()[0].stops, 1);
    }

    #[test]
    fn test_failure_envelope() {
        let err = decode(r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { .. }));
    }
}
