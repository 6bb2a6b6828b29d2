//! Lenient field deserializers for JSON-lines input.
//!
//! Access-log exporters are inconsistent about types: status codes arrive as
//! `403`, `403.0` or `"403"`. Each helper accepts any JSON scalar and yields
//! `None` for values it cannot interpret, so one odd field never costs the
//! whole line. Objects and arrays are still a decoding error.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match scalar(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Ok(None),
    }
}

pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar(deserializer)?.and_then(|value| match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => parse_int(&s),
        _ => None,
    }))
}

pub(crate) fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar(deserializer)?.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(&s),
        _ => None,
    }))
}

/// Parse an integer column, accepting an integral float such as `403.0`.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral))
}

pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(_)) => Err(de::Error::custom("expected a scalar, found an array")),
        Some(Value::Object(_)) => Err(de::Error::custom("expected a scalar, found an object")),
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(value)),
    }
}
