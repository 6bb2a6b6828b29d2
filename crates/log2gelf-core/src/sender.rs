//! Sender seam: delivers [`GelfMessage`] values to a sink.
//!
//! Delivery failures are per message: [`GelfSender::send_one`] reports them
//! as `false` and [`GelfSender::send_many`] keeps going. Nothing here is
//! fatal to a run. The HTTP implementation lives in `log2gelf-senders`.

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::gelf::GelfMessage;

/// Implemented by each delivery target.
pub trait GelfSender: Send + Sync {
    /// Deliver one message; `true` on success.
    fn send_one(&self, message: &GelfMessage) -> impl Future<Output = bool> + Send;

    /// Deliver every message in order, one at a time, without stopping at the
    /// first failure. Returns the number delivered.
    fn send_many(&self, messages: &[GelfMessage]) -> impl Future<Output = usize> + Send {
        async move {
            let mut sent = 0;
            for (idx, message) in messages.iter().enumerate() {
                if self.send_one(message).await {
                    sent += 1;
                } else {
                    tracing::debug!(index = idx, "message not delivered");
                }
            }
            sent
        }
    }
}

/// Dry-run sender: reports every message as delivered without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulateGelfSender;

impl SimulateGelfSender {
    pub fn new() -> Self {
        Self
    }
}

impl GelfSender for SimulateGelfSender {
    async fn send_one(&self, message: &GelfMessage) -> bool {
        match message.to_json() {
            Ok(body) => tracing::debug!(%body, "simulated GELF message"),
            Err(e) => tracing::debug!(error = %e, "simulated GELF message (unserializable)"),
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Sender selection
// ---------------------------------------------------------------------------

/// Delivery target discriminant, as named on the command line and in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SenderKind {
    #[default]
    Http,
    Simulate,
}

impl std::fmt::Display for SenderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenderKind::Http => write!(f, "http"),
            SenderKind::Simulate => write!(f, "simulate"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sender {0:?} (expected http or simulate)")]
pub struct UnknownSenderKind(String);

impl std::str::FromStr for SenderKind {
    type Err = UnknownSenderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(SenderKind::Http),
            "simulate" => Ok(SenderKind::Simulate),
            _ => Err(UnknownSenderKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for SenderKind {
    type Error = UnknownSenderKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
