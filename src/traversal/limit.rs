//! Row-count ceiling for one command invocation.

use tracing::debug;

/// Whether a traversal should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    /// The row limit was crossed. A clean stop, not an error.
    StopAtLimit,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        self == Flow::StopAtLimit
    }
}

/// Counts rows and reports when the invocation's row limit is crossed.
#[derive(Debug, Clone)]
pub struct RowLimitGuard {
    limit: u64,
    count: u64,
}

impl RowLimitGuard {
    /// Value of an absent row limit.
    pub const UNBOUNDED: u64 = u64::MAX;

    pub fn new(limit: u64) -> Self {
        Self { limit, count: 0 }
    }

    /// Zeroes the counter and installs a new limit.
    pub fn reset(&mut self, limit: u64) {
        self.limit = limit;
        self.count = 0;
    }

    /// Counts one row; stops once the count exceeds the limit.
    pub fn increment(&mut self) -> Flow {
        self.count = self.count.saturating_add(1);
        if self.count > self.limit {
            debug!(limit = self.limit, "Row limit reached");
            Flow::StopAtLimit
        } else {
            Flow::Continue
        }
    }

    /// Rows counted so far, including the one that crossed the limit.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for RowLimitGuard {
    fn default() -> Self {
        Self::new(Self::UNBOUNDED)
    }
}
