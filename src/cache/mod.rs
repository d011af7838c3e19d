//! Cache Module
//!
//! Provides a bounded, in-memory store of search result sets with FIFO
//! eviction and offset/count paging.

mod entry;
mod fifo;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, ResourceRef, ResultSet, SearchId};
pub use fifo::FifoTracker;
pub use stats::{PagingStats, StatsRecorder};
pub use store::{Page, PagingCache};

// == Public Constants ==
/// Number of search result sets retained when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 10;
