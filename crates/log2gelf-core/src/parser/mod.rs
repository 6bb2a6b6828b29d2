//! Log parsers that turn an access-log file into [`Record`] values.
//!
//! Two interchangeable input formats are supported:
//!
//! - `json.rs`: one JSON object per line
//! - `csv.rs`: a header row followed by positional columns
//!
//! Both follow the same error policy. Failing to open or read the file is a
//! [`ParseError`] for the caller; a line or row that cannot be decoded is
//! logged and skipped, reducing the yield without aborting the file.

mod csv;
mod json;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::types::Record;

pub use self::csv::{CsvLogParser, MIN_CSV_COLUMNS};
pub use self::json::JsonLogParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ParseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Implemented by each input format.
pub trait LogParser: Send + Sync {
    /// Parse a whole file, in file order. Undecodable lines are skipped.
    fn parse_file(&self, path: &Path) -> Result<Vec<Record>, ParseError>;

    /// Parse one raw line. `None` for blank or undecodable input.
    fn parse_line(&self, raw: &str) -> Option<Record>;

    fn kind(&self) -> ParserKind;
}

// ---------------------------------------------------------------------------
// Parser selection
// ---------------------------------------------------------------------------

/// Input format discriminant, as named on the command line and in config.
///
/// Config values go through [`FromStr`], so both sources accept any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ParserKind {
    #[default]
    Json,
    Csv,
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserKind::Json => write!(f, "json"),
            ParserKind::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown parser {0:?} (expected json or csv)")]
pub struct UnknownParserKind(String);

impl FromStr for ParserKind {
    type Err = UnknownParserKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ParserKind::Json),
            "csv" => Ok(ParserKind::Csv),
            _ => Err(UnknownParserKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ParserKind {
    type Error = UnknownParserKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The closed set of parsers, chosen once at startup.
#[derive(Debug, Clone)]
pub enum Parser {
    Json(JsonLogParser),
    Csv(CsvLogParser),
}

impl Parser {
    pub fn from_kind(kind: ParserKind) -> Self {
        match kind {
            ParserKind::Json => Parser::Json(JsonLogParser::new()),
            ParserKind::Csv => Parser::Csv(CsvLogParser::new()),
        }
    }
}

impl LogParser for Parser {
    fn parse_file(&self, path: &Path) -> Result<Vec<Record>, ParseError> {
        match self {
            Parser::Json(p) => p.parse_file(path),
            Parser::Csv(p) => p.parse_file(path),
        }
    }

    fn parse_line(&self, raw: &str) -> Option<Record> {
        match self {
            Parser::Json(p) => p.parse_line(raw),
            Parser::Csv(p) => p.parse_line(raw),
        }
    }

    fn kind(&self) -> ParserKind {
        match self {
            Parser::Json(p) => p.kind(),
            Parser::Csv(p) => p.kind(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
