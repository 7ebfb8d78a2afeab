//! Airline alias resolution for the allow-list filter.

use std::collections::BTreeSet;

/// Resolve a free-form airline name or code to its canonical IATA code.
///
/// Matching is trimmed and case-insensitive. Unknown names resolve to `None`
/// and can therefore never match a flight.
pub fn resolve_airline(name: &str) -> Option<&'static str> {
    let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    match key.as_str() {
        "GA" | "GARUDA" | "GARUDA INDONESIA" => Some("GA"),
        "JT" | "LION" | "LION AIR" => Some("JT"),
        "QZ" | "AIRASIA" | "AIR ASIA" | "AIRASIA INDONESIA" => Some("QZ"),
        "ID" | "BATIK" | "BATIK AIR" => Some("ID"),
        _ => None,
    }
}

/// Resolve a list of airline inputs to a sorted, de-duplicated set of codes.
pub fn normalize_airlines<S: AsRef<str>>(airlines: &[S]) -> Vec<String> {
    airlines
        .iter()
        .filter_map(|a| resolve_airline(a.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
