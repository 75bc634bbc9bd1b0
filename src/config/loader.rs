//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ExporterConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "EXPORTER_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ExporterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl ExporterConfig {
    /// Build the process configuration: defaults, then the file named by
    /// `EXPORTER_CONFIG` if set, then environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                let content = fs::read_to_string(&path)?;
                toml::from_str(&content)?
            }
            Err(_) => ExporterConfig::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }

    /// Overlay environment-style settings.
    ///
    /// `lookup` resolves a variable name to its value; the process uses
    /// `std::env::var`, tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("APP_URL") {
            self.target.base_url = url;
        }
        if let Some(port) = lookup("METRICS_PORT") {
            self.metrics.port = parse_env("METRICS_PORT", port)?;
        }
        if let Some(interval) = lookup("SCRAPE_INTERVAL") {
            self.probe.interval_secs = parse_env("SCRAPE_INTERVAL", interval)?;
        }
        if let Some(timeout) = lookup("PROBE_TIMEOUT") {
            self.probe.timeout_secs = parse_env("PROBE_TIMEOUT", timeout)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = parse_env::<LogFormat>("LOG_FORMAT", format)?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}
