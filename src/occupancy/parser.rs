//! Occupancy extraction from the parking page HTML.
//!
//! The page lists one spot per table row:
//! `ID | Etaza | Sekcija | Je Okupirano`, the last cell being `True` or `False`.
//!
//! Two strategies run in sequence:
//! 1. [`Strategy::StructuredRows`]: every `<tr>` with four `<td>` cells whose
//!    last cell is a boolean. Cells may span lines and carry attributes.
//! 2. [`Strategy::TokenFallback`]: only when no row matched, every
//!    `<td>True</td>` and `<td>False</td>` cell anywhere in the document.
//!
//! # Limitations
//! The fallback ignores document structure. Boolean cells outside the spot
//! table (legends, other tables) are counted too, so its numbers can be
//! higher than the real lot size.
//!
//! Patterns run on the `regex` crate, which matches in linear time, so
//! hostile or malformed markup cannot stall the probe loop.

use std::sync::OnceLock;

use regex::Regex;

use crate::observability::metrics::MetricStore;
use crate::occupancy::types::{OccupancySnapshot, ParseError, ParseOutcome, Strategy};

const ROW_PATTERN: &str =
    r"(?is)<tr\b[^>]*>\s*(?:<td\b[^>]*>.*?</td>\s*){3}<td\b[^>]*>\s*(true|false)\s*</td>\s*</tr>";

const CELL_PATTERN: &str = r"(?i)<td\b[^>]*>\s*(true|false)\s*</td>";

static ROW_REGEX: OnceLock<Regex> = OnceLock::new();
static CELL_REGEX: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex, ParseError> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }
    let regex = Regex::new(pattern)?;
    Ok(cell.get_or_init(|| regex))
}

/// Scans parking pages and feeds the result into the metric store.
#[derive(Debug, Clone)]
pub struct OccupancyParser {
    max_body_bytes: usize,
}

impl OccupancyParser {
    pub fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    /// Extract occupancy from `html`.
    ///
    /// Returns `Ok(None)` when the page contains no occupancy flag at all.
    pub fn parse(&self, html: &str) -> Result<Option<ParseOutcome>, ParseError> {
        if html.len() > self.max_body_bytes {
            return Err(ParseError::TooLarge {
                len: html.len(),
                limit: self.max_body_bytes,
            });
        }

        let rows = compiled(&ROW_REGEX, ROW_PATTERN)?;
        let (occupied, free) = count_flags(rows, html);
        if occupied + free > 0 {
            return Ok(Some(ParseOutcome {
                snapshot: OccupancySnapshot::new(occupied, free),
                strategy: Strategy::StructuredRows,
            }));
        }

        let cells = compiled(&CELL_REGEX, CELL_PATTERN)?;
        let (occupied, free) = count_flags(cells, html);
        if occupied + free > 0 {
            return Ok(Some(ParseOutcome {
                snapshot: OccupancySnapshot::new(occupied, free),
                strategy: Strategy::TokenFallback,
            }));
        }

        Ok(None)
    }

    /// Parse `html` and publish the snapshot.
    ///
    /// Errors and empty pages are logged and leave the occupancy gauges at
    /// their previous values.
    pub fn apply(&self, store: &MetricStore, html: &str) -> Option<ParseOutcome> {
        match self.parse(html) {
            Ok(Some(outcome)) => {
                store.record_occupancy(&outcome.snapshot);
                tracing::debug!(
                    strategy = %outcome.strategy,
                    occupied = outcome.snapshot.occupied,
                    free = outcome.snapshot.free,
                    "Occupancy updated"
                );
                Some(outcome)
            }
            Ok(None) => {
                tracing::warn!(
                    body_len = html.len(),
                    "No parking spots found in page, keeping previous occupancy"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not parse parking stats");
                None
            }
        }
    }
}

/// Count `(true, false)` captures of group 1.
fn count_flags(pattern: &Regex, html: &str) -> (u64, u64) {
    pattern
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .fold((0, 0), |(occupied, free), flag| {
            if flag.as_str().eq_ignore_ascii_case("true") {
                (occupied + 1, free)
            } else {
                (occupied, free + 1)
            }
        })
}
