//! Formatter: maps a [`Record`] onto a [`GelfMessage`].
//!
//! The message wording is a wire contract with downstream Graylog consumers
//! (dashboards and alerts match on it), so it must not drift:
//!
//! ```text
//! short: Request from {source_ip} -> {destination_ip}: {request_uri} ({status_code})
//! full:  Request from {device_type} from {source_ip}:{source_port} -> {destination_ip}: {request_uri} ({status_code})
//! ```
//!
//! Missing values render as [`MISSING_VALUE_TOKEN`].

use std::fmt;

use crate::gelf::GelfMessage;
use crate::types::Record;

/// Rendered in place of a missing value inside message strings.
pub const MISSING_VALUE_TOKEN: &str = "null";

pub trait GelfFormatter: Send + Sync {
    /// Never fails: an empty record still yields a well-formed message.
    fn format(&self, record: &Record) -> GelfMessage;
}

/// Formatter for edge access-log records.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogFormatter;

impl AccessLogFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl GelfFormatter for AccessLogFormatter {
    fn format(&self, record: &Record) -> GelfMessage {
        let short_message = format!(
            "Request from {} -> {}: {} ({})",
            Shown(&record.source_ip),
            Shown(&record.destination_ip),
            Shown(&record.request_uri),
            Shown(&record.status_code),
        );
        let full_message = format!(
            "Request from {} from {}:{} -> {}: {} ({})",
            Shown(&record.device_type),
            Shown(&record.source_ip),
            Shown(&record.source_port),
            Shown(&record.destination_ip),
            Shown(&record.request_uri),
            Shown(&record.status_code),
        );

        let mut message = GelfMessage::new(record.source_ip.clone(), short_message);
        message.full_message = full_message;
        message.timestamp = record.start_timestamp;

        for (name, value) in record.fields() {
            // Canonical names are fixed identifiers and always valid.
            if let Err(e) = message.set_field(name, value) {
                tracing::warn!(field = name, error = %e, "dropping additional field");
            }
        }

        tracing::trace!(short_message = %message.short_message, "formatted record");
        message
    }
}

/// Displays the inner value, or the missing-value token.
struct Shown<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Shown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(MISSING_VALUE_TOKEN),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
