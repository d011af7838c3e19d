//! FIFO Tracker Module
//!
//! Tracks insertion order of search IDs for first-in first-out eviction.

use std::collections::VecDeque;

use crate::cache::SearchId;

// == FIFO Tracker ==
/// Tracks insertion order for FIFO eviction.
///
/// IDs are stored in a VecDeque where:
/// - Front = Oldest insertion
/// - Back = Newest insertion
///
/// Reads never reorder the queue.
#[derive(Debug, Default)]
pub struct FifoTracker {
    order: VecDeque<SearchId>,
}

impl FifoTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    /// Creates a tracker with room for `capacity` IDs plus the one that
    /// briefly overflows it during a store.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    // == Push Newest ==
    /// Records a freshly inserted ID at the newest end.
    pub fn push_newest(&mut self, id: SearchId) {
        self.order.push_back(id);
    }

    // == Evict Oldest ==
    /// Returns and removes the earliest inserted ID.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<SearchId> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the next eviction candidate without removing it.
    pub fn peek_oldest(&self) -> Option<&SearchId> {
        self.order.front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Linear scan, intended for tests and assertions.
    pub fn contains(&self, id: &SearchId) -> bool {
        self.order.iter().any(|tracked| tracked == id)
    }
}
