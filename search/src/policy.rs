//! Search policy types.

use std::time::Duration;

use crate::error::SearchError;

/// Default depth bound, matching the corpus the driver verifies.
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Default number of evaluated candidates between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Default preallocation for the frontier queue and visited map.
pub const DEFAULT_FRONTIER_CAPACITY: usize = 1024;

/// Depth bound and run controls for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// A newly recorded depth above this ends the search as not found.
    pub max_depth: u32,
    /// Emit a progress event every this many evaluated candidates (0 = off).
    pub progress_interval: u64,
    /// Wall-clock budget. Checked after the depth bound, never instead of it.
    pub deadline: Option<Duration>,
    /// Initial capacity of the frontier queue and visited map.
    pub frontier_capacity: usize,
    /// Record the fingerprint of every dequeued state in the report.
    pub record_expansion_order: bool,
}

impl SearchPolicy {
    /// Default policy with the given depth bound.
    #[must_use]
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Reject policies the engine cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_depth` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_depth == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_depth must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            deadline: None,
            frontier_capacity: DEFAULT_FRONTIER_CAPACITY,
            record_expansion_order: false,
        }
    }
}
