//! log2gelf-core - access-log to GELF shipping core.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across them.
//!
//! # Architecture
//!
//! ```text
//! parser ──► formatter ──► sender
//!    └──────── pipeline ────────┘
//! ```
//!
//! [`pipeline::LogProcessor`] drives the stages in order for one file. The
//! parser and sender are chosen once at startup and passed in explicitly.

pub mod config;
pub mod formatter;
pub mod gelf;
pub mod parser;
pub mod pipeline;
pub mod sender;
pub mod types;
mod serde_utils;

pub use formatter::{AccessLogFormatter, GelfFormatter, MISSING_VALUE_TOKEN};
pub use gelf::{GelfError, GelfMessage};
pub use parser::{LogParser, ParseError, Parser, ParserKind};
pub use pipeline::LogProcessor;
pub use sender::{GelfSender, SenderKind, SimulateGelfSender};
pub use types::{FieldValue, Record};
