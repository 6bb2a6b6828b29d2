use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::parser::{LogParser, ParseError, ParserKind};
use crate::types::Record;

/// JSON-lines parser: one self-contained object per line.
#[derive(Debug, Clone, Default)]
pub struct JsonLogParser;

impl JsonLogParser {
    pub fn new() -> Self {
        Self
    }

    /// Each line must be a JSON object; arrays would otherwise decode
    /// positionally into the record.
    fn decode(raw: &str) -> Result<Record, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("expected a JSON object"));
        }
        Record::deserialize(value)
    }
}

impl LogParser for JsonLogParser {
    fn parse_file(&self, path: &Path) -> Result<Vec<Record>, ParseError> {
        tracing::info!(path = %path.display(), "parsing JSON log file");
        let file = File::open(path).map_err(|e| ParseError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (idx, line) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let bytes = line.map_err(|e| ParseError::io(path, e))?;
            let Ok(text) = String::from_utf8(bytes) else {
                tracing::warn!(line = line_no, "skipping line that is not valid UTF-8");
                skipped += 1;
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            match self.parse_line(&text) {
                Some(record) => records.push(record),
                None => {
                    tracing::debug!(line = line_no, "line dropped");
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            path = %path.display(),
            parsed = records.len(),
            skipped,
            "parsed JSON log file"
        );
        Ok(records)
    }

    fn parse_line(&self, raw: &str) -> Option<Record> {
        let raw = raw.trim();
        if raw.is_empty() {
            tracing::debug!("empty log line");
            return None;
        }
        match Self::decode(raw) {
            Ok(record) => {
                tracing::trace!(?record, "parsed log line");
                Some(record)
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed JSON log line");
                tracing::debug!(raw, "malformed line content");
                None
            }
        }
    }

    fn kind(&self) -> ParserKind {
        ParserKind::Json
    }
}
