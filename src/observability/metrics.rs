//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Own the exporter's instrument set
//! - Record probe outcomes and occupancy snapshots
//! - Render the Prometheus text exposition format
//!
//! # Metrics
//! - `parking_app_up` (gauge): 1 if the last probe got HTTP 200, else 0
//! - `parking_app_response_time_seconds` (histogram): probe latency
//! - `parking_app_health_checks_total` (counter): probes by `status` (success, error)
//! - `parking_spots_total`, `parking_spots_occupied`, `parking_spots_free` (gauges)
//! - `parking_occupancy_ratio` (gauge): occupied / total, 0-1
//!
//! # Design Decisions
//! - One `MetricStore` per process, shared through `Arc`; no global recorder
//! - Instruments are `metrics` handles backed by atomics, so the exposition
//!   path reads while the prober writes without extra locking
//! - Occupancy gauges are registered on the first snapshot and the ratio on
//!   the first non-empty one; until then they are absent from the output

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics::{Counter, Gauge, Histogram};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

use crate::occupancy::OccupancySnapshot;

pub const APP_UP: &str = "parking_app_up";
pub const APP_RESPONSE_TIME: &str = "parking_app_response_time_seconds";
pub const HEALTH_CHECKS: &str = "parking_app_health_checks_total";
pub const SPOTS_TOTAL: &str = "parking_spots_total";
pub const SPOTS_OCCUPIED: &str = "parking_spots_occupied";
pub const SPOTS_FREE: &str = "parking_spots_free";
pub const OCCUPANCY_RATIO: &str = "parking_occupancy_ratio";

/// Histogram buckets for probe latency, in seconds.
pub const LATENCY_BUCKETS: [f64; 6] = [0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Label value for `parking_app_health_checks_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Success,
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Success => "success",
            CheckStatus::Error => "error",
        }
    }
}

struct OccupancyGauges {
    total: Gauge,
    occupied: Gauge,
    free: Gauge,
}

/// The exporter's instruments and the recorder that renders them.
pub struct MetricStore {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    up: Gauge,
    response_time: Histogram,
    checks_success: Counter,
    checks_error: Counter,
    occupancy: OnceLock<OccupancyGauges>,
    ratio: OnceLock<Gauge>,
}

impl MetricStore {
    /// Build a store with its own recorder.
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Full(APP_RESPONSE_TIME.to_string()), &LATENCY_BUCKETS)?
            .build_recorder();
        let handle = recorder.handle();

        let (up, response_time, checks_success, checks_error) =
            metrics::with_local_recorder(&recorder, || {
                describe_gauge!(APP_UP, "Application availability (1=up, 0=down)");
                describe_histogram!(APP_RESPONSE_TIME, "Response time of health check");
                describe_counter!(HEALTH_CHECKS, "Total health checks performed");
                describe_gauge!(SPOTS_TOTAL, "Total parking spots");
                describe_gauge!(SPOTS_OCCUPIED, "Occupied parking spots");
                describe_gauge!(SPOTS_FREE, "Free parking spots");
                describe_gauge!(OCCUPANCY_RATIO, "Parking occupancy ratio (0-1)");

                (
                    gauge!(APP_UP),
                    histogram!(APP_RESPONSE_TIME),
                    counter!(HEALTH_CHECKS, "status" => CheckStatus::Success.as_str()),
                    counter!(HEALTH_CHECKS, "status" => CheckStatus::Error.as_str()),
                )
            });

        Ok(Self {
            recorder,
            handle,
            up,
            response_time,
            checks_success,
            checks_error,
            occupancy: OnceLock::new(),
            ratio: OnceLock::new(),
        })
    }

    pub fn record_up(&self, up: bool) {
        self.up.set(if up { 1.0 } else { 0.0 });
    }

    pub fn record_latency(&self, latency: Duration) {
        self.response_time.record(latency.as_secs_f64());
    }

    pub fn record_check(&self, status: CheckStatus) {
        match status {
            CheckStatus::Success => self.checks_success.increment(1),
            CheckStatus::Error => self.checks_error.increment(1),
        }
    }

    /// Publish a snapshot. Total, occupied and free are always written
    /// together; the ratio only when the lot is non-empty.
    pub fn record_occupancy(&self, snapshot: &OccupancySnapshot) {
        let gauges = self.occupancy.get_or_init(|| {
            metrics::with_local_recorder(&self.recorder, || OccupancyGauges {
                total: gauge!(SPOTS_TOTAL),
                occupied: gauge!(SPOTS_OCCUPIED),
                free: gauge!(SPOTS_FREE),
            })
        });
        gauges.occupied.set(snapshot.occupied as f64);
        gauges.free.set(snapshot.free as f64);
        gauges.total.set(snapshot.total() as f64);

        if let Some(ratio) = snapshot.ratio() {
            self.ratio
                .get_or_init(|| metrics::with_local_recorder(&self.recorder, || gauge!(OCCUPANCY_RATIO)))
                .set(ratio);
        }
    }

    /// Prometheus text exposition of every registered instrument.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Drain histogram buffers; called once per probe cycle.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }
}

/// Value of one series in a rendered exposition, e.g.
/// `parking_app_health_checks_total{status="error"}`. Used by tests.
#[doc(hidden)]
pub fn sample(rendered: &str, series: &str) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find(|line| line.split_whitespace().next() == Some(series))
        .and_then(|line| line.split_whitespace().last())
        .and_then(|value| value.parse().ok())
}
