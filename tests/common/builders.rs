//! Test builders and scripted collaborators.
//!
//! These are for readability in assertions, not production use. They panic
//! on misuse rather than returning `Result`.

use std::sync::Mutex;

use log2gelf_core::{GelfMessage, GelfSender, Record};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures; starts with every field missing.
///
/// ```rust
/// let record = RecordBuilder::new()
///     .source_ip("192.168.87.52")
///     .status_code(403)
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_type(mut self, v: &str) -> Self {
        self.record.device_type = Some(v.to_string());
        self
    }

    pub fn source_ip(mut self, v: &str) -> Self {
        self.record.source_ip = Some(v.to_string());
        self
    }

    pub fn destination_ip(mut self, v: &str) -> Self {
        self.record.destination_ip = Some(v.to_string());
        self
    }

    pub fn request_uri(mut self, v: &str) -> Self {
        self.record.request_uri = Some(v.to_string());
        self
    }

    pub fn status_code(mut self, v: i64) -> Self {
        self.record.status_code = Some(v);
        self
    }

    pub fn source_port(mut self, v: i64) -> Self {
        self.record.source_port = Some(v);
        self
    }

    pub fn start_timestamp(mut self, v: f64) -> Self {
        self.record.start_timestamp = Some(v);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// The request used in the pinned formatting examples.
pub fn search_request() -> Record {
    RecordBuilder::new()
        .source_ip("192.168.87.52")
        .destination_ip("172.16.153.30")
        .request_uri("/search")
        .status_code(403)
        .device_type("desktop")
        .source_port(122)
        .build()
}

/// `n` formatted-looking messages with distinct short messages.
pub fn message_batch(n: usize) -> Vec<GelfMessage> {
    (0..n)
        .map(|i| GelfMessage::new(Some(format!("10.0.0.{i}")), format!("message {i}")))
        .collect()
}

// ---------------------------------------------------------------------------
// ScriptedSender
// ---------------------------------------------------------------------------

/// Records every attempt and rejects the attempts whose index is listed.
#[derive(Default)]
pub struct ScriptedSender {
    reject: Vec<usize>,
    attempts: Mutex<Vec<GelfMessage>>,
}

impl ScriptedSender {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(indices: &[usize]) -> Self {
        Self {
            reject: indices.to_vec(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<GelfMessage> {
        self.attempts.lock().unwrap().clone()
    }
}

impl GelfSender for ScriptedSender {
    async fn send_one(&self, message: &GelfMessage) -> bool {
        let mut attempts = self.attempts.lock().unwrap();
        let idx = attempts.len();
        attempts.push(message.clone());
        !self.reject.contains(&idx)
    }
}
