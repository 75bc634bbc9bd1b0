//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → MetricStore → bind metrics listener → spawn server + prober
//!
//! Shutdown (shutdown.rs):
//!     Signal received → trigger → prober leaves its loop, server drains → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Binding the metrics port is the only fatal runtime error
//! - Without a signal the exporter runs until the process is killed

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
