//! Command-line surface.
//!
//! Flags left unset fall back to the config file, then to
//! `LOG2GELF__SECTION__KEY` environment variables, then to the built-in
//! defaults (json parser, http sender, `http://localhost:12202/gelf`, 10 s).

use std::path::PathBuf;

use clap::Parser;
use log2gelf_core::config::{Config, ConfigError};
use log2gelf_core::{ParserKind, SenderKind};

#[derive(Debug, Parser)]
#[command(
    name = "log2gelf",
    version,
    about = "Parses access-log files and sends them to Graylog using the GELF format"
)]
pub struct Cli {
    /// Log file to parse as input.
    #[arg(value_name = "LOG_FILE")]
    pub log_file: PathBuf,

    /// Input format: json or csv [default: json].
    #[arg(short, long, value_name = "FORMAT")]
    pub parser: Option<ParserKind>,

    /// Delivery target: http or simulate [default: http].
    #[arg(short, long, value_name = "TARGET")]
    pub sender: Option<SenderKind>,

    /// URL of the Graylog GELF HTTP input [default: http://localhost:12202/gelf].
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP request timeout in seconds [default: 10].
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// TOML settings file with [input] and [output] sections.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective settings and enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Effective settings: loaded config with command-line flags applied.
    pub fn settings(&self) -> Result<Config, ConfigError> {
        let mut cfg = Config::load(self.config.as_deref())?;
        if let Some(parser) = self.parser {
            cfg.input.parser = parser;
        }
        if let Some(sender) = self.sender {
            cfg.output.sender = sender;
        }
        if let Some(url) = &self.url {
            cfg.output.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.output.timeout_secs = timeout;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
