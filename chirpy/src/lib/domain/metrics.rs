use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Request hit counter owned by the application state.
///
/// Shared across request handlers behind an `Arc`; every operation is a single
/// atomic instruction.
#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit.
    pub fn record(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Current number of hits.
    pub fn count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reset to zero, returning the count before the reset.
    pub fn reset(&self) -> u64 {
        self.hits.swap(0, Ordering::Relaxed)
    }
}
