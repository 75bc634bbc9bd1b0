//! Occupancy types and error definitions.

use std::fmt;

use thiserror::Error;

/// Occupied/free counts derived from one parse of the parking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccupancySnapshot {
    pub occupied: u64,
    pub free: u64,
}

impl OccupancySnapshot {
    pub fn new(occupied: u64, free: u64) -> Self {
        Self { occupied, free }
    }

    pub fn total(&self) -> u64 {
        self.occupied + self.free
    }

    /// `occupied / total`, undefined for an empty lot.
    pub fn ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.occupied as f64 / total as f64),
        }
    }
}

/// Which extraction strategy produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Four-cell `<tr>` rows whose last cell is `True`/`False`.
    StructuredRows,
    /// Any `<td>True</td>` / `<td>False</td>` cell anywhere in the page.
    TokenFallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::StructuredRows => "structured_rows",
            Strategy::TokenFallback => "token_fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a parse that found at least one occupancy flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOutcome {
    pub snapshot: OccupancySnapshot,
    pub strategy: Strategy,
}

/// Errors that can occur while scanning a page.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A built-in pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The page exceeds the configured scan limit.
    #[error("body of {len} bytes exceeds scan limit of {limit} bytes")]
    TooLarge { len: usize, limit: usize },
}
