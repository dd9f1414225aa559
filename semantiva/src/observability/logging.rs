//! Structured logging setup.
//!
//! The library itself only emits `tracing` events. Binaries and test
//! harnesses call [`init_logging`] once to install a subscriber.

use crate::errors::{Result, SemantivaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "SEMANTIVA_LOG";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Colored output (text format only).
    #[serde(default = "default_ansi")]
    pub ansi: bool,
    /// Per-target levels, e.g. `semantiva::registry = "debug"`.
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            ansi: default_ansi(),
            targets: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Sets the level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets the format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Adds a per-target level.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>, level: impl Into<String>) -> Self {
        self.targets.insert(target.into(), level.into());
        self
    }
}

/// Builds the event filter.
///
/// A valid `SEMANTIVA_LOG` value wins over the configuration.
///
/// # Errors
///
/// Returns `Config` if the level is not a level name or a configured
/// directive cannot be parsed.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level: LevelFilter = config
        .level
        .parse()
        .map_err(|e| SemantivaError::Config(format!("Invalid log level `{}`: {e}", config.level)))?;
    let mut filter = EnvFilter::default().add_directive(level.into());

    for (target, level) in &config.targets {
        let directive = format!("{target}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| SemantivaError::Config(format!("Invalid log directive `{directive}`: {e}")))?,
        );
    }
    Ok(filter)
}

/// Installs the global subscriber, writing to stderr.
///
/// # Errors
///
/// Returns `Config` if the filter is invalid or a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config)?;
    let subscriber = Registry::default().with(filter);

    let outcome = match config.format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    outcome.map_err(|e| SemantivaError::Config(format!("Logging already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_logging_config() {
        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.ansi);
    }

    #[test]
    fn test_parse_json_format() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "debug", "format": "json", "ansi": false}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_invalid_target_directive() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let config = LoggingConfig::default().with_target("semantiva", "verbose");
        assert!(matches!(build_env_filter(&config), Err(SemantivaError::Config(_))));
    }

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let config = LoggingConfig::default().with_level("verbose");
        assert!(matches!(build_env_filter(&config), Err(SemantivaError::Config(_))));

        for level in ["trace", "debug", "info", "warn", "error", "off"] {
            assert!(build_env_filter(&LoggingConfig::default().with_level(level)).is_ok());
        }
    }

    #[test]
    fn test_second_init_is_reported() {
        let config = LoggingConfig::default().with_level("warn");
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
