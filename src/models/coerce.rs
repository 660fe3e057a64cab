//! Lenient field coercion for raw exports.
//!
//! Source data comes from form-driven exports where numeric columns may hold
//! strings, nulls, or garbage, and dates may be date strings, full timestamps,
//! or missing. Every model field goes through one of these helpers instead of
//! re-implementing the defaulting inline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::EntityId;

/// Coerce a JSON value to a finite f64, defaulting to 0.0.
///
/// Accepts numbers and numeric strings; everything else (null, booleans,
/// objects, NaN/Infinity) becomes 0.0.
pub fn num_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse a date from a lenient string form.
///
/// Accepts `YYYY-MM-DD` and RFC3339 timestamps (the date part is kept).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    // Timestamps in other zones/formats still usually lead with the date.
    if s.len() > 10 {
        if let Ok(d) = NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d") {
            return Some(d);
        }
    }
    None
}

/// Fall back to today when a date is structurally required (chart x-position).
pub fn date_or_now(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

/// Serde adapter: numeric field that defaults to 0.0 instead of failing.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(num_or_zero(&value))
}

/// Serde adapter: lenient optional date.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// Serde adapter: ID field that tolerates numeric IDs from older exports.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => EntityId::from(s),
        Value::Number(n) => EntityId::from(n.to_string()),
        _ => EntityId::default(),
    })
}
