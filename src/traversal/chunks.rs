//! Locating the end of a chunk series.
//!
//! Large values are stored as qualifiers `<prefix><index>` with contiguous
//! indices. Rather than reading every chunk, the locator finds the last index
//! with a galloping search followed by bisection, issuing only existence checks.

use crate::error::Result;
use tracing::trace;

/// Search state: `low` is known present, `high` (once found) known absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    low: u64,
    probe: u64,
    high: Option<u64>,
}

fn midpoint(low: u64, high: u64) -> u64 {
    low + (high - low) / 2
}

/// Finds the last index of a contiguous chunk series.
#[derive(Debug, Clone, Copy)]
pub struct ChunkLocator {
    ceiling: u64,
}

impl ChunkLocator {
    /// `ceiling` is the expected chunk count, used as the first probe span.
    pub fn new(ceiling: u64) -> Self {
        Self {
            ceiling: ceiling.max(1),
        }
    }

    /// Returns the last present index, given that `first` is present.
    ///
    /// Assumes the series is contiguous: every index between `first` and the
    /// last one exists and nothing beyond it does. Interior indices are not
    /// re-verified.
    pub fn find_last_index<F>(&self, first: u64, mut exists: F) -> Result<u64>
    where
        F: FnMut(u64) -> Result<bool>,
    {
        let mut span = self.ceiling;
        let mut bounds = Bounds {
            low: first,
            probe: first.saturating_add(span),
            high: None,
        };

        loop {
            if bounds.probe == bounds.low {
                return Ok(bounds.low);
            }

            let present = exists(bounds.probe)?;
            trace!(?bounds, present, "Chunk probe");

            bounds = match (present, bounds.high) {
                (true, None) => {
                    if bounds.probe == u64::MAX {
                        return Ok(bounds.probe);
                    }
                    span = span.saturating_mul(2);
                    Bounds {
                        low: bounds.probe,
                        probe: bounds.probe.saturating_add(span),
                        high: None,
                    }
                }
                (true, Some(high)) => {
                    let low = bounds.probe;
                    if high == low + 1 {
                        return Ok(low);
                    }
                    Bounds {
                        low,
                        probe: midpoint(low, high),
                        high: Some(high),
                    }
                }
                (false, _) => {
                    let high = bounds.probe;
                    if high == bounds.low + 1 {
                        return Ok(bounds.low);
                    }
                    Bounds {
                        low: bounds.low,
                        probe: midpoint(bounds.low, high),
                        high: Some(high),
                    }
                }
            };
        }
    }
}
