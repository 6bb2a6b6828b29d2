//! Core types for log2gelf-core.
//!
//! [`Record`] is the format-agnostic representation of one access-log line.
//! Parsers produce it, the formatter consumes it. [`FieldValue`] is the value
//! type carried in a GELF message's additional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_utils::{lenient_float, lenient_int, lenient_string};

/// Number of attributes on a [`Record`].
pub const RECORD_FIELD_COUNT: usize = 14;

/// Canonical field names, in CSV column order.
///
/// These are the names used for the underscore-prefixed GELF additional
/// fields, so they are part of the wire contract with Graylog consumers.
pub const FIELD_NAMES: [&str; RECORD_FIELD_COUNT] = [
    "clientDeviceType",
    "clientIp",
    "clientIpClass",
    "clientStatus",
    "clientRequestBytes",
    "clientRequestReferer",
    "clientRequestUri",
    "clientRequestUserAgent",
    "clientSrcPort",
    "edgeServerIp",
    "edgeStartTimestamp",
    "destinationIp",
    "originResponseBytes",
    "originResponseTime",
];

/// One parsed access-log entry.
///
/// Every attribute is optional because upstream data is untrusted. A missing
/// attribute is `None`; it is never coerced to zero or an empty string, so the
/// formatter can tell "missing" apart from "empty".
///
/// JSON input keys are fixed externally and case-sensitive (`ClientIP`,
/// `EdgeStartTimestamp`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "ClientDeviceType", deserialize_with = "lenient_string")]
    pub device_type: Option<String>,
    #[serde(rename = "ClientIP", deserialize_with = "lenient_string")]
    pub source_ip: Option<String>,
    #[serde(rename = "ClientIPClass", deserialize_with = "lenient_string")]
    pub ip_class: Option<String>,
    #[serde(rename = "ClientStatus", deserialize_with = "lenient_int")]
    pub status_code: Option<i64>,
    #[serde(rename = "ClientRequestBytes", deserialize_with = "lenient_int")]
    pub request_bytes: Option<i64>,
    #[serde(rename = "ClientRequestReferer", deserialize_with = "lenient_string")]
    pub referer: Option<String>,
    #[serde(rename = "ClientRequestURI", deserialize_with = "lenient_string")]
    pub request_uri: Option<String>,
    #[serde(rename = "ClientRequestUserAgent", deserialize_with = "lenient_string")]
    pub user_agent: Option<String>,
    #[serde(rename = "ClientSrcPort", deserialize_with = "lenient_int")]
    pub source_port: Option<i64>,
    #[serde(rename = "EdgeServerIP", deserialize_with = "lenient_string")]
    pub edge_server_ip: Option<String>,
    /// Event start, seconds since the Unix epoch.
    #[serde(rename = "EdgeStartTimestamp", deserialize_with = "lenient_float")]
    pub start_timestamp: Option<f64>,
    #[serde(rename = "DestinationIP", deserialize_with = "lenient_string")]
    pub destination_ip: Option<String>,
    #[serde(rename = "OriginResponseBytes", deserialize_with = "lenient_int")]
    pub response_bytes: Option<i64>,
    #[serde(rename = "OriginResponseTime", deserialize_with = "lenient_int")]
    pub response_time_nanos: Option<i64>,
}

impl Record {
    /// Every attribute paired with its canonical field name, in
    /// [`FIELD_NAMES`] order. Missing attributes are kept as `None`.
    pub fn fields(&self) -> [(&'static str, Option<FieldValue>); RECORD_FIELD_COUNT] {
        let [
            device_type,
            source_ip,
            ip_class,
            status_code,
            request_bytes,
            referer,
            request_uri,
            user_agent,
            source_port,
            edge_server_ip,
            start_timestamp,
            destination_ip,
            response_bytes,
            response_time_nanos,
        ] = FIELD_NAMES;
        [
            (device_type, self.device_type.clone().map(FieldValue::Str)),
            (source_ip, self.source_ip.clone().map(FieldValue::Str)),
            (ip_class, self.ip_class.clone().map(FieldValue::Str)),
            (status_code, self.status_code.map(FieldValue::Int)),
            (request_bytes, self.request_bytes.map(FieldValue::Int)),
            (referer, self.referer.clone().map(FieldValue::Str)),
            (request_uri, self.request_uri.clone().map(FieldValue::Str)),
            (user_agent, self.user_agent.clone().map(FieldValue::Str)),
            (source_port, self.source_port.map(FieldValue::Int)),
            (edge_server_ip, self.edge_server_ip.clone().map(FieldValue::Str)),
            (start_timestamp, self.start_timestamp.map(FieldValue::Float)),
            (destination_ip, self.destination_ip.clone().map(FieldValue::Str)),
            (response_bytes, self.response_bytes.map(FieldValue::Int)),
            (response_time_nanos, self.response_time_nanos.map(FieldValue::Int)),
        ]
    }

    /// `start_timestamp` as a UTC date-time, if present and representable.
    pub fn event_time(&self) -> Option<DateTime<Utc>> {
        let ts = self.start_timestamp?;
        if !ts.is_finite() {
            return None;
        }
        let secs = ts.floor();
        let nanos = ((ts - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// True when no attribute is present.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }
}

/// A GELF additional-field value.
///
/// Serialized untagged: numbers and booleans become JSON numbers and booleans,
/// strings become JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
