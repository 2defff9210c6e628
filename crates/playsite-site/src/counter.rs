//! Process-wide count of successful admissions.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts every successful admit and enqueue.
///
/// Only ever incremented. Removals, dequeues and rejections leave it
/// alone, so the total is the number of visitors let in (onsite or
/// queued) since the registry was created.
#[derive(Debug, Default)]
pub struct VisitorCounter(AtomicU64);

impl VisitorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visitor and returns the new total.
    pub(crate) fn record(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current total.
    pub fn total(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
