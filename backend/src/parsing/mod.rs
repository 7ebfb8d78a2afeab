//! Normalization helpers shared by the upstream adapters.
//!
//! # Helpers
//!
//! - [`time`]: flexible timestamp layouts, named-timezone lookup, `HH:MM` windows
//! - [`price`]: numeric or textual amounts into whole IDR
//! - [`airline`]: free-form airline names into canonical codes
//! - [`reconcile_stops`]: direct flag plus explicit stop count into one number

pub mod airline;
pub mod price;
pub mod time;

pub use airline::{normalize_airlines, resolve_airline};
pub use price::{parse_price, parse_price_str};
pub use time::{parse_flexible_time, parse_time_of_day, parse_time_with_tz};

/// Reconcile a "direct" indicator with an explicit stop or segment count.
///
/// A direct flag is authoritative and always yields zero. A non-direct flag
/// uses the explicit count, defaulting to one when the count is absent or
/// contradicts the flag by being zero. Without any flag the explicit count is
/// used as-is.
pub fn reconcile_stops(direct: Option<bool>, explicit: Option<u32>) -> u32 {
    match (direct, explicit) {
        (Some(true), _) => 0,
        (Some(false), Some(n)) if n > 0 => n,
        (Some(false), _) => 1,
        (None, n) => n.unwrap_or(0),
    }
}
