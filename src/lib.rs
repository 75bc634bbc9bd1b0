//! Parking application metrics exporter library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod occupancy;

pub use config::ExporterConfig;
pub use lifecycle::Shutdown;
pub use observability::MetricStore;
