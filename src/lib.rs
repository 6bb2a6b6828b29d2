//! log2gelf - ship access-log files to Graylog as GELF messages.
//!
//! The binary is thin glue around [`log2gelf_core::LogProcessor`]: it parses
//! the command line, resolves settings, picks a parser and a sender once, and
//! runs the pipeline over a single file.
//!
//! # Architecture
//!
//! ```text
//! Cli ──► Config ──► LogProcessor<Parser, AccessLogFormatter, Sender>
//! ```

pub mod cli;

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context};
use log2gelf_core::{AccessLogFormatter, LogProcessor, Parser};
use log2gelf_senders::Sender;

pub use cli::Cli;

/// Run one file through the pipeline and return the delivered count.
pub async fn run(cli: &Cli) -> anyhow::Result<usize> {
    let settings = cli.settings().context("invalid settings")?;

    if cli.verbose {
        println!("Logfile: {}", display_path(&cli.log_file));
        println!("Parser: {}", settings.input.parser);
        println!("Sender: {}", settings.output.sender);
        println!("Graylog URL: {}", settings.output.url);
        println!("Timeout: {} sec", settings.output.timeout_secs);
    }

    check_log_file(&cli.log_file)?;

    let sender = Sender::from_config(&settings.output)?;
    let processor = LogProcessor::new(
        Parser::from_kind(settings.input.parser),
        AccessLogFormatter::new(),
        sender,
    );

    let sent = processor
        .process_file(&cli.log_file)
        .await
        .with_context(|| format!("failed to process {}", cli.log_file.display()))?;

    tracing::info!(
        sent,
        parser = %settings.input.parser,
        sender = %settings.output.sender,
        "finished sending messages to Graylog"
    );
    Ok(sent)
}

/// The input must be an existing, readable regular file.
fn check_log_file(path: &Path) -> anyhow::Result<()> {
    let readable = std::fs::metadata(path).is_ok_and(|m| m.is_file()) && File::open(path).is_ok();
    if !readable {
        bail!(
            "Log file does not exist, is not a file or cannot be read: {}",
            display_path(path)
        );
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
