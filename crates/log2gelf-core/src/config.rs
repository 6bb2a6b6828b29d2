//! Configuration types for log2gelf.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults, an
//! optional TOML file, then `LOG2GELF__SECTION__KEY` environment variables.
//! Command-line flags are applied on top by the binary. [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem or the
//! environment (useful in tests).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::parser::ParserKind;
use crate::sender::SenderKind;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_URL: &str = "http://localhost:12202/gelf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_CONFIG: &str = r#"
[input]
parser = "json"

[output]
sender       = "http"
url          = "http://localhost:12202/gelf"
timeout_secs = 10
"#;

const ENV_PREFIX: &str = "LOG2GELF";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("output.url must not be empty")]
    EmptyUrl,
    #[error("output.timeout_secs must be at least 1")]
    ZeroTimeout,
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub parser: ParserKind,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub sender: SenderKind,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String { DEFAULT_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sender: SenderKind::default(),
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OutputConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load settings, layering `file` (if given, it must exist) and the
    /// environment over the embedded defaults.
    ///
    /// Not validated here: command-line flags may still replace a bad value,
    /// so callers run [`Config::validate`] once every layer is applied.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let cfg: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// The embedded defaults, without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if self.output.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
