use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::parser::{LogParser, ParseError, ParserKind};
use crate::serde_utils::{parse_float, parse_int};
use crate::types::Record;

/// Rows shorter than this are dropped. The trailing columns (start timestamp,
/// destination, response bytes and time) may be left off.
pub const MIN_CSV_COLUMNS: usize = 10;

/// CSV parser: one header row, then columns in canonical field order.
#[derive(Debug, Clone, Default)]
pub struct CsvLogParser;

impl CsvLogParser {
    pub fn new() -> Self {
        Self
    }

    fn builder(has_headers: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(b',')
            .quote(b'"')
            .has_headers(has_headers)
            .flexible(true)
            .trim(Trim::None);
        builder
    }
}

impl LogParser for CsvLogParser {
    fn parse_file(&self, path: &Path) -> Result<Vec<Record>, ParseError> {
        tracing::info!(path = %path.display(), "parsing CSV log file");
        let file = File::open(path).map_err(|e| ParseError::io(path, e))?;
        let mut reader = Self::builder(true).from_reader(BufReader::new(file));

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(ParseError::io(path, e.into())),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable CSV row");
                    skipped += 1;
                    continue;
                }
            };
            match record_from_row(&row) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        tracing::info!(
            path = %path.display(),
            parsed = records.len(),
            skipped,
            "parsed CSV log file"
        );
        Ok(records)
    }

    fn parse_line(&self, raw: &str) -> Option<Record> {
        if raw.trim().is_empty() {
            tracing::debug!("empty log line");
            return None;
        }
        let mut reader = Self::builder(false).from_reader(raw.as_bytes());
        match reader.records().next()? {
            Ok(row) => record_from_row(&row),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable CSV line");
                None
            }
        }
    }

    fn kind(&self) -> ParserKind {
        ParserKind::Csv
    }
}

fn record_from_row(row: &StringRecord) -> Option<Record> {
    if row.len() < MIN_CSV_COLUMNS {
        tracing::warn!(
            columns = row.len(),
            required = MIN_CSV_COLUMNS,
            line = row.position().map(|p| p.line()),
            "CSV row has insufficient columns"
        );
        return None;
    }

    let text = |col: usize| row.get(col).map(str::to_owned);
    let int = |col: usize| numeric(row, col, parse_int);
    let float = |col: usize| numeric(row, col, parse_float);

    Some(Record {
        device_type: text(0),
        source_ip: text(1),
        ip_class: text(2),
        status_code: int(3),
        request_bytes: int(4),
        referer: text(5),
        request_uri: text(6),
        user_agent: text(7),
        source_port: int(8),
        edge_server_ip: text(9),
        start_timestamp: float(10),
        destination_ip: text(11),
        response_bytes: int(12),
        response_time_nanos: int(13),
    })
}

/// An empty or unparsable numeric column becomes `None`; the rest of the row
/// is kept. Surrounding whitespace is ignored here only; text columns are
/// kept verbatim.
fn numeric<T>(row: &StringRecord, col: usize, parse: fn(&str) -> Option<T>) -> Option<T> {
    let raw = row.get(col).map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::debug!(column = col, raw, "unparsable numeric CSV column");
    }
    parsed
}
