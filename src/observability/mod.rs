//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober and parser produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (MetricStore: gauges, counters, histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape via http::server)
//! ```

pub mod logging;
pub mod metrics;

pub use self::metrics::{CheckStatus, MetricStore};
