//! GELF 1.1 message model and its JSON wire form.
//!
//! A [`GelfMessage`] carries the fixed GELF keys plus an ordered bag of
//! additional fields. On the wire every additional field is written with a
//! leading underscore after the standard keys:
//!
//! ```text
//! {"version":"1.1","host":"10.0.0.1","short_message":"…","full_message":"…",
//!  "timestamp":1576929197.0,"level":1,"_clientIp":"10.0.0.1",…}
//! ```

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use thiserror::Error;

use crate::types::FieldValue;

/// GELF specification version written into every message.
pub const GELF_VERSION: &str = "1.1";

/// Default severity (syslog "alert"); no dynamic mapping yet.
pub const DEFAULT_LEVEL: u8 = 1;

/// Keys owned by the GELF envelope.
pub const RESERVED_KEYS: [&str; 6] = [
    "version",
    "host",
    "short_message",
    "full_message",
    "timestamp",
    "level",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GelfError {
    #[error("additional field name must not be empty")]
    EmptyFieldName,
    /// `_id` is reserved by Graylog.
    #[error("additional field name {0:?} is reserved")]
    ReservedFieldName(String),
    #[error("additional field name {0:?} contains characters outside [A-Za-z0-9_.-]")]
    InvalidFieldName(String),
}

/// One GELF message, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct GelfMessage {
    pub host: Option<String>,
    pub short_message: String,
    pub full_message: String,
    /// Seconds since the Unix epoch. `None` leaves the key out of the body
    /// and Graylog stamps the message with its receive time.
    pub timestamp: Option<f64>,
    pub level: u8,
    additional_fields: BTreeMap<String, Option<FieldValue>>,
}

impl GelfMessage {
    pub fn new(host: Option<String>, short_message: impl Into<String>) -> Self {
        Self {
            host,
            short_message: short_message.into(),
            full_message: String::new(),
            timestamp: None,
            level: DEFAULT_LEVEL,
            additional_fields: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> &'static str {
        GELF_VERSION
    }

    /// Additional fields keyed by their un-prefixed name.
    pub fn additional_fields(&self) -> &BTreeMap<String, Option<FieldValue>> {
        &self.additional_fields
    }

    pub fn field(&self, name: &str) -> Option<&Option<FieldValue>> {
        self.additional_fields.get(name)
    }

    /// Set an additional field. `value` of `None` is kept and serialized as
    /// `null`.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: Option<FieldValue>,
    ) -> Result<(), GelfError> {
        let name = name.into();
        validate_field_name(&name)?;
        self.additional_fields.insert(name, value);
        Ok(())
    }

    /// Serialize to the compact JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Check a name against GELF's additional-field rules.
pub fn validate_field_name(name: &str) -> Result<(), GelfError> {
    if name.is_empty() {
        return Err(GelfError::EmptyFieldName);
    }
    if name == "id" {
        return Err(GelfError::ReservedFieldName(name.to_string()));
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(GelfError::InvalidFieldName(name.to_string()));
    }
    Ok(())
}

impl Serialize for GelfMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("version", GELF_VERSION)?;
        map.serialize_entry("host", &self.host)?;
        map.serialize_entry("short_message", &self.short_message)?;
        map.serialize_entry("full_message", &self.full_message)?;
        if let Some(ts) = self.timestamp {
            map.serialize_entry("timestamp", &ts)?;
        }
        map.serialize_entry("level", &self.level)?;
        for (name, value) in &self.additional_fields {
            map.serialize_entry(&format!("_{name}"), value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
