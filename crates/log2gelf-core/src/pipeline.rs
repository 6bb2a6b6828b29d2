//! Processing pipeline: parse a file, format its records, deliver the batch.
//!
//! ```text
//! LogParser ──► GelfFormatter ──► GelfSender
//! ```
//!
//! Stages run strictly one after another. Only an unreadable input file is an
//! error; dropped lines and failed deliveries just lower the returned count.

use std::path::Path;

use crate::formatter::GelfFormatter;
use crate::gelf::GelfMessage;
use crate::parser::{LogParser, ParseError};
use crate::sender::GelfSender;
use crate::types::Record;

/// Composes one parser, one formatter and one sender.
#[derive(Debug, Clone)]
pub struct LogProcessor<P, F, S> {
    parser: P,
    formatter: F,
    sender: S,
}

impl<P, F, S> LogProcessor<P, F, S>
where
    P: LogParser,
    F: GelfFormatter,
    S: GelfSender,
{
    pub fn new(parser: P, formatter: F, sender: S) -> Self {
        Self {
            parser,
            formatter,
            sender,
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Process `path` end to end and return how many messages were delivered.
    ///
    /// A file with no usable records returns `Ok(0)` without touching the
    /// sender.
    pub async fn process_file(&self, path: &Path) -> Result<usize, ParseError> {
        let records = self.parser.parse_file(path)?;
        tracing::info!(
            count = records.len(),
            path = %path.display(),
            "found log messages"
        );

        if records.is_empty() {
            tracing::warn!(path = %path.display(), "no log messages found");
            return Ok(0);
        }
        log_event_range(&records);

        let messages: Vec<GelfMessage> = records
            .iter()
            .map(|record| self.formatter.format(record))
            .collect();
        tracing::info!(
            converted = messages.len(),
            total = records.len(),
            "converted log messages to GELF"
        );

        let sent = self.sender.send_many(&messages).await;
        tracing::info!(sent, total = messages.len(), "delivered GELF messages");
        Ok(sent)
    }
}

fn log_event_range(records: &[Record]) {
    let mut times = records.iter().filter_map(Record::event_time);
    let Some(first) = times.next() else {
        tracing::debug!("batch carries no event timestamps");
        return;
    };
    let (earliest, latest) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    tracing::debug!(%earliest, %latest, "batch event time range");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
