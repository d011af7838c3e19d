//! Paging Statistics Module
//!
//! Tracks paging cache metrics including stores, hits, misses, and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Paging Stats ==
/// Point-in-time view of the paging cache metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagingStats {
    /// Number of result sets stored
    pub stores: u64,
    /// Number of successful page retrievals
    pub hits: u64,
    /// Number of retrievals for an unknown or evicted search ID
    pub misses: u64,
    /// Number of result sets evicted by the FIFO policy
    pub evictions: u64,
    /// Current number of retained result sets
    pub total_entries: usize,
    /// Maximum number of retained result sets
    pub capacity: usize,
}

impl PagingStats {
    // == Hit Rate ==
    /// Calculates the retrieval hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no retrievals have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters updated by the cache.
///
/// Retrieval only holds a shared read lock, so counters are atomics rather
/// than fields behind the write lock.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    stores: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Captures the counters together with the current occupancy.
    pub fn snapshot(&self, total_entries: usize, capacity: usize) -> PagingStats {
        PagingStats {
            stores: self.stores.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            total_entries,
            capacity,
        }
    }
}
