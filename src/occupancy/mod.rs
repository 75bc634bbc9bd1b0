//! Parking occupancy extraction.
//!
//! # Data Flow
//! ```text
//! HTTP 200 body from the prober
//!     → parser.rs (structured rows, then token fallback)
//!     → OccupancySnapshot (types.rs)
//!     → MetricStore::record_occupancy
//! ```
//!
//! # Design Decisions
//! - Pure with respect to its input: no IO, no shared state besides the store
//! - A page with no signal never overwrites the previous snapshot
//! - Every error is logged and swallowed; the probe loop never sees one

pub mod parser;
pub mod types;

pub use parser::OccupancyParser;
pub use types::{OccupancySnapshot, ParseError, ParseOutcome, Strategy};
