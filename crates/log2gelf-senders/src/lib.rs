//! log2gelf-senders - GELF delivery targets for log2gelf.
//!
//! Each target implements [`log2gelf_core::GelfSender`]. [`Sender`] is the
//! closed set the binary picks from once at startup.

pub mod http;

use log2gelf_core::config::OutputConfig;
use log2gelf_core::{GelfMessage, GelfSender, SenderKind, SimulateGelfSender};

pub use http::{HttpGelfSender, SenderError};

/// The delivery target selected for a run.
#[derive(Debug, Clone)]
pub enum Sender {
    Http(HttpGelfSender),
    Simulate(SimulateGelfSender),
}

impl Sender {
    /// Build the sender named by `output.sender`. Only the HTTP target reads
    /// the URL and timeout.
    pub fn from_config(output: &OutputConfig) -> Result<Self, SenderError> {
        match output.sender {
            SenderKind::Http => Ok(Sender::Http(HttpGelfSender::new(
                &output.url,
                output.timeout(),
            )?)),
            SenderKind::Simulate => Ok(Sender::Simulate(SimulateGelfSender::new())),
        }
    }

    pub fn kind(&self) -> SenderKind {
        match self {
            Sender::Http(_) => SenderKind::Http,
            Sender::Simulate(_) => SenderKind::Simulate,
        }
    }
}

impl GelfSender for Sender {
    async fn send_one(&self, message: &GelfMessage) -> bool {
        match self {
            Sender::Http(sender) => sender.send_one(message).await,
            Sender::Simulate(sender) => sender.send_one(message).await,
        }
    }
}
