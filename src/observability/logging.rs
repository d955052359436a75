//! Structured logging configuration.

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_FILTER_ENV: &str = "HOOPGRAPH_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for anything other than `pretty` or `json`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown log format '{other}' (expected 'pretty' or 'json')"
            ))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Optional append-mode log file; stderr otherwise.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging configuration from config settings.
    ///
    /// `HOOPGRAPH_LOG` takes precedence over the configured level; `verbose`
    /// raises the fallback level from `info` to `debug`.
    ///
    /// # Errors
    ///
    /// Returns an error if the format or filter directive is invalid.
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Result<Self> {
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .transpose()?
            .unwrap_or_default();

        let fallback = settings
            .and_then(|s| s.level.clone())
            .unwrap_or_else(|| if verbose { "debug" } else { "info" }.to_string());

        let filter = match std::env::var(LOG_FILTER_ENV) {
            Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive),
            _ => EnvFilter::try_new(&fallback),
        }
        .map_err(|e| Error::InvalidInput(format!("invalid log filter: {e}")))?;

        Ok(Self {
            format,
            filter,
            file: settings.and_then(|s| s.file.clone()),
        })
    }
}
