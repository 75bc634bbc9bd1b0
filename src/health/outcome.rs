//! Probe outcome classification.
//!
//! # Outcomes
//! ```text
//! HTTP 200              → Healthy     (latency sample, up=1, success, parse body)
//! HTTP 200, huge body   → Oversized   (latency sample, up=1, success, no parse)
//! any other status      → BadStatus   (latency sample, up=0, error)
//! no response / no body → Unreachable (no latency sample, up=0, error)
//! ```
//!
//! # Design Decisions
//! - Redirects are followed; only a final 200 counts as up, other 2xx are errors
//! - Latency is measured up to the response head, so a sample exists only
//!   when the target actually answered
//! - Bodies are read up to `probe.max_body_bytes`; the rest is never buffered

use std::time::Duration;

use thiserror::Error;

use crate::observability::metrics::CheckStatus;

/// Why a probe got no usable response.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl ProbeError {
    /// Classify a client error; `timeout` is the configured probe timeout.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout)
        } else if err.is_connect() {
            ProbeError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            ProbeError::Body(err.to_string())
        } else {
            ProbeError::Request(err.to_string())
        }
    }
}

/// Result of a single probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Healthy { latency: Duration, body: String },
    Oversized { latency: Duration, limit: usize },
    BadStatus { latency: Duration, status: u16 },
    Unreachable(ProbeError),
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(
            self,
            ProbeOutcome::Healthy { .. } | ProbeOutcome::Oversized { .. }
        )
    }

    pub fn check_status(&self) -> CheckStatus {
        if self.is_up() {
            CheckStatus::Success
        } else {
            CheckStatus::Error
        }
    }

    /// Latency sample to record, if the target answered.
    pub fn latency(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Healthy { latency, .. }
            | ProbeOutcome::Oversized { latency, .. }
            | ProbeOutcome::BadStatus { latency, .. } => Some(*latency),
            ProbeOutcome::Unreachable(_) => None,
        }
    }

    /// Body to scan for occupancy; only healthy responses have one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Healthy { body, .. } => Some(body),
            _ => None,
        }
    }
}
