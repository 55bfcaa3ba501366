//! Skip statistics tracking.
//!
//! This module provides thread-safe counters for notices dropped during a
//! sync, one per [`SkipReason`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::SkipReason;

/// Thread-safe skip statistics tracker.
///
/// All reasons are initialized to zero on creation, so lookups never miss.
/// Can be shared across tasks using `Arc`.
pub struct SyncStats {
    skipped: HashMap<SkipReason, AtomicUsize>,
}

impl SyncStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut skipped = HashMap::new();
        for reason in SkipReason::iter() {
            skipped.insert(reason, AtomicUsize::new(0));
        }
        SyncStats { skipped }
    }

    /// Increment the counter for a skip reason.
    pub fn increment(&self, reason: SkipReason) {
        if let Some(counter) = self.skipped.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment skip counter for {:?} which is not in the map",
                reason
            );
        }
    }

    /// Get the count for a skip reason.
    pub fn get_count(&self, reason: SkipReason) -> usize {
        self.skipped
            .get(&reason)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of skipped notices across all reasons.
    pub fn total(&self) -> usize {
        self.skipped
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Non-zero counters, in declaration order.
    pub fn non_zero(&self) -> Vec<(SkipReason, usize)> {
        SkipReason::iter()
            .map(|reason| (reason, self.get_count(reason)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for SyncStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyncStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.non_zero()).finish()
    }
}
