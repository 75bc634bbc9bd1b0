//! Active health checking of the parking application.
//!
//! # Responsibilities
//! - Periodically probe the target's index page
//! - Record availability, latency and check counts
//! - Hand healthy pages to the occupancy parser

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time;
use url::Url;

use crate::config::{ProbeConfig, TargetConfig};
use crate::health::outcome::{ProbeError, ProbeOutcome};
use crate::observability::MetricStore;
use crate::occupancy::{OccupancyParser, ParseOutcome};

/// Errors building a prober.
#[derive(Debug, Error)]
pub enum ProberError {
    #[error("invalid target URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What one cycle did, for logging and tests.
#[derive(Debug)]
pub struct CycleReport {
    pub up: bool,
    pub latency: Option<Duration>,
    pub occupancy: Option<ParseOutcome>,
}

pub struct Prober {
    client: reqwest::Client,
    url: Url,
    config: ProbeConfig,
    parser: OccupancyParser,
    store: Arc<MetricStore>,
}

impl Prober {
    pub fn new(
        target: &TargetConfig,
        config: ProbeConfig,
        store: Arc<MetricStore>,
    ) -> Result<Self, ProberError> {
        let url = target.probe_url()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            url,
            parser: OccupancyParser::new(config.max_body_bytes),
            config,
            store,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Issue one GET against the target and classify the result.
    pub async fn probe_once(&self) -> ProbeOutcome {
        let start = Instant::now();
        let mut response = match self.client.get(self.url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Unreachable(ProbeError::from_reqwest(e, self.timeout())),
        };
        let latency = start.elapsed();

        let status = response.status();
        if status != StatusCode::OK {
            return ProbeOutcome::BadStatus {
                latency,
                status: status.as_u16(),
            };
        }

        let limit = self.config.max_body_bytes;
        let oversized = ProbeOutcome::Oversized { latency, limit };
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return oversized;
        }

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if body.len() + chunk.len() > limit {
                        return oversized;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    return ProbeOutcome::Unreachable(ProbeError::from_reqwest(e, self.timeout()))
                }
            }
        }

        ProbeOutcome::Healthy {
            latency,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    /// Probe, record, and parse on success. Never fails.
    pub async fn run_cycle(&self) -> CycleReport {
        let outcome = self.probe_once().await;

        if let Some(latency) = outcome.latency() {
            self.store.record_latency(latency);
        }
        self.store.record_up(outcome.is_up());
        self.store.record_check(outcome.check_status());

        match &outcome {
            ProbeOutcome::Healthy { latency, .. } => {
                tracing::debug!(
                    url = %self.url,
                    latency_ms = latency.as_millis() as u64,
                    "Health check succeeded"
                );
            }
            ProbeOutcome::Oversized { latency, limit } => {
                tracing::warn!(
                    url = %self.url,
                    limit_bytes = *limit,
                    latency_ms = latency.as_millis() as u64,
                    "Health check succeeded but page exceeds scan limit, keeping previous occupancy"
                );
            }
            ProbeOutcome::BadStatus { latency, status } => {
                tracing::warn!(
                    url = %self.url,
                    status = *status,
                    latency_ms = latency.as_millis() as u64,
                    "Health check failed: non-200 status"
                );
            }
            ProbeOutcome::Unreachable(e) => {
                tracing::warn!(url = %self.url, error = %e, "Health check failed");
            }
        }

        let occupancy = outcome
            .body()
            .and_then(|body| self.parser.apply(&self.store, body));

        self.store.run_upkeep();

        CycleReport {
            up: outcome.is_up(),
            latency: outcome.latency(),
            occupancy,
        }
    }

    /// Run cycles until shutdown, sleeping the full interval after each one.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            url = %self.url,
            interval_secs = self.config.interval_secs,
            timeout_secs = self.config.timeout_secs,
            "Prober starting"
        );

        let interval = Duration::from_secs(self.config.interval_secs);
        let mut cycles: u64 = 0;

        loop {
            tokio::select! {
                report = self.run_cycle() => {
                    cycles += 1;
                    tracing::debug!(cycle = cycles, up = report.up, "Probe cycle complete");
                }
                _ = shutdown.recv() => break,
            }

            tokio::select! {
                _ = time::sleep(interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!(cycles, "Prober received shutdown signal, exiting loop");
    }
}
