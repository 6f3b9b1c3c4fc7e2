//! Logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! process entry point's job, done once through [`init_logging`].

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::error::{PrepError, Result};

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, human-oriented output.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `prepkit=debug`).
    pub level: String,
    pub format: LogFormat,
    /// Include source file and line of each event.
    pub show_location: bool,
    /// Include the event's module target.
    pub show_target: bool,
    /// Colored output.
    pub ansi: bool,
    /// `chrono` format string for the local timestamp.
    pub timestamp_format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            show_location: true,
            show_target: false,
            ansi: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }
}

impl LogConfig {
    /// Set the fallback filter directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output layout.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// `RUST_LOG` when set and valid, otherwise `level`.
    fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| PrepError::Logging(format!("invalid level '{}': {}", self.level, e))),
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// Fails with [`PrepError::Logging`] when the level is invalid or a
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_timer(ChronoLocal::new(config.timestamp_format.clone()))
        .with_file(config.show_location)
        .with_line_number(config.show_location)
        .with_target(config.show_target)
        .with_ansi(config.ansi);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| PrepError::Logging(e.to_string()))
}
