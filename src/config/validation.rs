//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval and timeout > 0, port valid)
//! - Check the target URL is something the prober can reach
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::{Host, Url};

use crate::config::schema::ExporterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target.base_url '{url}' is not a valid URL: {reason}")]
    InvalidTargetUrl { url: String, reason: String },

    #[error("target.base_url scheme must be http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("metrics.listen_address '{address}' is not a valid host: {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("logging.level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check every semantic constraint, collecting all violations.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.target.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidTargetUrl {
            url: config.target.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.probe.interval_secs == 0 {
        errors.push(ValidationError::Zero("probe.interval_secs"));
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::Zero("probe.timeout_secs"));
    }
    if config.probe.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("probe.max_body_bytes"));
    }
    if config.metrics.port == 0 {
        errors.push(ValidationError::Zero("metrics.port"));
    }

    // Hostnames are resolved at bind time; IPv6 literals need brackets.
    if let Err(e) = Host::parse(&config.metrics.listen_address) {
        errors.push(ValidationError::InvalidListenAddress {
            address: config.metrics.listen_address.clone(),
            reason: e.to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
