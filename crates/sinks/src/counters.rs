//! Per-sink delivery counters for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single sink.
///
/// Updated with plain atomic increments, never under the sink's write lock,
/// so a monitoring path can read them without blocking any writer.
#[derive(Debug, Default)]
pub struct SinkCounters {
    /// Writes whose transport call reported success
    delivered: AtomicU64,
    /// Writes whose transport call did not succeed
    dropped: AtomicU64,
}

impl SinkCounters {
    /// Create new counters, all zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Get delivered count
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Increment delivered count
    pub fn inc_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Get dropped count
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Increment dropped count
    pub fn inc_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            delivered: self.delivered(),
            dropped: self.dropped(),
        }
    }
}

/// Snapshot of sink counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub delivered: u64,
    pub dropped: u64,
}
