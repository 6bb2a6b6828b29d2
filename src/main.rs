use std::process::ExitCode;

use clap::Parser;
use log2gelf::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "log2gelf started");

    match log2gelf::run(&cli).await {
        Ok(sent) => {
            println!("Successfully sent {sent} messages to Graylog");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "error processing log file");
            eprintln!("Error processing log file: {e:#}");
            ExitCode::FAILURE
        }
    }
}
