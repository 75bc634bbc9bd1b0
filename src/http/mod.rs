//! HTTP exposition subsystem.
//!
//! # Data Flow
//! ```text
//! Prometheus scrape (GET /metrics)
//!     → server.rs (Axum router, TraceLayer)
//!     → MetricStore::render
//!     → text exposition format
//! ```

pub mod server;

pub use server::MetricsServer;
