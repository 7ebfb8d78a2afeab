//! Timestamp parsing for upstream records and query time windows.
//!
//! Upstreams disagree on how they express instants: some send RFC 3339 with an
//! offset, some send naive local timestamps, and some send a naive timestamp
//! plus an IANA zone name in a sibling field. Layouts are tried in a fixed
//! order and the first one that parses wins.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::RecordError;

/// Naive layout shared by the flexible and the named-timezone strategies.
pub const NAIVE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Offset-carrying layouts tried after RFC 3339, in order.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%z"];

/// Parse an upstream timestamp that may or may not carry an offset.
///
/// Order: RFC 3339, `+07:00` offset, `+0700` offset, then naive. A naive
/// timestamp is taken as UTC.
pub fn parse_flexible_time(value: &str) -> Result<DateTime<FixedOffset>, RecordError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(value, layout) {
            return Ok(dt);
        }
    }

    NaiveDateTime::parse_from_str(value, NAIVE_LAYOUT)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| RecordError::Time(value.to_string()))
}

/// Parse a naive timestamp in the IANA zone named by `tz` (e.g. `Asia/Makassar`).
///
/// For wall-clock times repeated by a DST transition the earlier instant is
/// used; times skipped by a transition are rejected.
pub fn parse_time_with_tz(datetime: &str, tz: &str) -> Result<DateTime<FixedOffset>, RecordError> {
    let zone: Tz = tz
        .trim()
        .parse()
        .map_err(|_| RecordError::Timezone(tz.to_string()))?;

    let naive = NaiveDateTime::parse_from_str(datetime.trim(), NAIVE_LAYOUT)
        .map_err(|_| RecordError::Time(datetime.to_string()))?;

    zone.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| RecordError::Time(format!("{} does not exist in {}", datetime, tz)))
}

/// Parse a `HH:MM` time-of-day used by the departure/arrival windows.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| format!("expected HH:MM, got '{}'", value))
}
