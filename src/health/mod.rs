//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Prober loop (prober.rs):
//!     GET target index page (bounded by probe timeout)
//!     → classify (outcome.rs): Healthy | BadStatus | Unreachable
//!     → MetricStore: up, latency, health check counter
//!     → Healthy only: occupancy parser
//!     → sleep full interval (interruptible by shutdown)
//! ```
//!
//! # Design Decisions
//! - One probe in flight at a time; cycles never overlap
//! - No retries: a failed probe waits for the next tick
//! - Errors only change metric values; the loop never exits on them

pub mod outcome;
pub mod prober;

pub use outcome::{ProbeError, ProbeOutcome};
pub use prober::{CycleReport, Prober, ProberError};
