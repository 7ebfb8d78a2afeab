//! Price normalization into whole IDR.

use serde_json::Value;

use crate::error::RecordError;

/// Normalize an upstream price into an integer amount.
///
/// Accepts JSON integers, JSON floats (truncated toward zero) and strings such
/// as `" 1,250,000 "`. Anything else is a per-record failure.
pub fn parse_price(value: &Value) -> Result<i64, RecordError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(RecordError::Price(n.to_string())),
            }
        }
        Value::String(s) => parse_price_str(s),
        other => Err(RecordError::Price(other.to_string())),
    }
}

/// Parse a textual amount with optional thousands separators.
pub fn parse_price_str(s: &str) -> Result<i64, RecordError> {
    let clean: String = s.trim().chars().filter(|c| *c != ',').collect();
    clean
        .parse::<i64>()
        .map_err(|_| RecordError::Price(s.to_string()))
}
