//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exporter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExporterConfig {
    /// Application being monitored.
    pub target: TargetConfig,

    /// Probe loop settings.
    pub probe: ProbeConfig,

    /// Metrics exposition endpoint.
    pub metrics: MetricsConfig,

    /// Log level and output format.
    pub logging: LoggingConfig,
}

/// Monitored application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Root URL probed on every cycle (e.g., "http://localhost:5000").
    pub base_url: String,
}

impl TargetConfig {
    /// Index page of the target (`base_url` with a trailing slash); the page
    /// that lists the parking spots.
    pub fn probe_url(&self) -> Result<url::Url, url::ParseError> {
        let mut url = url::Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Probe loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Pause between the end of one probe cycle and the start of the next.
    pub interval_secs: u64,

    /// Upper bound on a single probe request, including the body read.
    pub timeout_secs: u64,

    /// Bodies larger than this are not scanned for occupancy.
    pub max_body_bytes: usize,

    /// User-Agent header sent with every probe.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_secs: 15,
            timeout_secs: 10,
            max_body_bytes: 5 * 1024 * 1024, // 5MB
            user_agent: "parking-exporter-probe".to_string(),
        }
    }
}

/// Metrics exposition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Interface the metrics endpoint binds to: an IP literal (IPv6 in
    /// brackets) or a hostname resolved at bind time.
    pub listen_address: String,

    /// Port the metrics endpoint binds to.
    pub port: u16,
}

impl MetricsConfig {
    /// `listen_address:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_address, self.port)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0".to_string(),
            port: 9090,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
