//! Paging Cache Module
//!
//! Main cache engine combining HashMap storage with FIFO tracking, guarded by
//! a single lock so concurrent stores and retrievals stay consistent.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, FifoTracker, PagingStats, ResourceRef, ResultSet, SearchId, StatsRecorder,
};
use crate::error::{PagingError, Result};

// == Page ==
/// One window of a stored result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub search_id: SearchId,
    /// Index of the first resource in the window
    pub offset: usize,
    /// Requested window size
    pub count: usize,
    /// Length of the whole result set
    pub total: usize,
    pub resources: Vec<ResourceRef>,
}

impl Page {
    /// Offset of the following page, if the result set continues past this one.
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset.saturating_add(self.count);
        (self.count > 0 && next < self.total).then_some(next)
    }

    /// Offset of the preceding page, if this page does not start at zero.
    ///
    /// An empty window has no preceding page, it would point back at itself.
    pub fn previous_offset(&self) -> Option<usize> {
        (self.count > 0 && self.offset > 0).then_some(self.offset.saturating_sub(self.count))
    }

    /// Cuts the `[offset, offset + count)` window out of a result set snapshot.
    fn window(
        search_id: SearchId,
        resources: &[ResourceRef],
        offset: usize,
        count: usize,
    ) -> Self {
        let total = resources.len();
        let start = offset.min(total);
        let end = start.saturating_add(count).min(total);

        Self {
            search_id,
            offset,
            count,
            total,
            resources: resources[start..end].to_vec(),
        }
    }
}

// == Result Store ==
/// Unsynchronized storage; always accessed through the lock in `PagingCache`.
#[derive(Debug)]
struct ResultStore {
    entries: HashMap<SearchId, CacheEntry>,
    fifo: FifoTracker,
    next_sequence: u64,
}

impl ResultStore {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity + 1),
            fifo: FifoTracker::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Inserts a new entry at the newest end and returns the IDs evicted to
    /// bring the store back within `capacity`.
    fn insert(&mut self, result_set: ResultSet, capacity: usize) -> (SearchId, Vec<SearchId>) {
        let mut id = SearchId::generate();
        while self.entries.contains_key(&id) {
            id = SearchId::generate();
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries
            .insert(id.clone(), CacheEntry::new(id.clone(), result_set, sequence));
        self.fifo.push_newest(id.clone());

        let mut evicted = Vec::new();
        while self.entries.len() > capacity {
            match self.fifo.evict_oldest() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    evicted.push(oldest);
                }
                None => break,
            }
        }

        (id, evicted)
    }
}

// == Paging Cache ==
/// Bounded, thread-safe store of search result sets with FIFO eviction.
///
/// Eviction order is strictly insertion order; reading a page never
/// refreshes an entry.
#[derive(Debug)]
pub struct PagingCache {
    inner: RwLock<ResultStore>,
    stats: StatsRecorder,
    capacity: usize,
}

impl PagingCache {
    // == Constructor ==
    /// Creates a cache retaining at most `capacity` result sets.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("Paging cache capacity of 0 requested, using 1");
            1
        } else {
            capacity
        };

        Self {
            inner: RwLock::new(ResultStore::with_capacity(capacity)),
            stats: StatsRecorder::new(),
            capacity,
        }
    }

    // Critical sections never panic midway, so a poisoned lock still guards
    // a consistent store.
    fn read(&self) -> RwLockReadGuard<'_, ResultStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ResultStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Store ==
    /// Stores a result set and returns the search ID issued for it.
    ///
    /// If the cache grows past capacity the oldest result sets are discarded.
    pub fn store(&self, result_set: impl Into<ResultSet>) -> SearchId {
        let result_set = result_set.into();
        let length = result_set.len();

        let (id, evicted, size) = {
            let mut inner = self.write();
            let (id, evicted) = inner.insert(result_set, self.capacity);
            (id, evicted, inner.entries.len())
        };

        self.record_store(&id, &evicted, length, size);
        id
    }

    // == Store And Page ==
    /// Stores a result set and returns its first page of `count` resources.
    ///
    /// The page is cut while the write lock is still held, so a concurrent
    /// store cannot evict the new entry before its first page is read.
    ///
    /// # Errors
    /// - `InvalidArgument` if `count` is negative; nothing is stored
    pub fn store_and_page(
        &self,
        result_set: impl Into<ResultSet>,
        count: i64,
    ) -> Result<(SearchId, Page)> {
        let count = non_negative("count", count)?;
        let result_set = result_set.into();
        let length = result_set.len();
        let resources = result_set.snapshot();

        let (id, evicted, size) = {
            let mut inner = self.write();
            let (id, evicted) = inner.insert(result_set, self.capacity);
            (id, evicted, inner.entries.len())
        };

        self.record_store(&id, &evicted, length, size);
        self.stats.record_hit();

        let page = Page::window(id.clone(), &resources, 0, count);
        Ok((id, page))
    }

    fn record_store(&self, id: &SearchId, evicted: &[SearchId], length: usize, size: usize) {
        self.stats.record_store();
        for evicted_id in evicted {
            self.stats.record_eviction();
            debug!(search_id = %evicted_id, "Evicted oldest search result set");
        }
        debug!(search_id = %id, resources = length, size, "Stored search result set");
    }

    // == Retrieve ==
    /// Returns up to `count` resources starting at `offset`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `offset` or `count` is negative
    /// - `NotFound` if the search ID is unknown or has been evicted
    pub fn retrieve(&self, id: &SearchId, offset: i64, count: i64) -> Result<Vec<ResourceRef>> {
        self.retrieve_page(id, offset, count).map(|page| page.resources)
    }

    // == Retrieve Page ==
    /// Same as `retrieve`, but also reports the length of the whole result set.
    pub fn retrieve_page(&self, id: &SearchId, offset: i64, count: i64) -> Result<Page> {
        let offset = non_negative("offset", offset)?;
        let count = non_negative("count", count)?;

        let snapshot = self
            .read()
            .entries
            .get(id)
            .map(|entry| entry.result_set.snapshot());
        let Some(resources) = snapshot else {
            self.stats.record_miss();
            return Err(PagingError::NotFound(id.to_string()));
        };
        self.stats.record_hit();

        Ok(Page::window(id.clone(), &resources, offset, count))
    }

    // == Size ==
    /// Returns the current number of retained result sets.
    pub fn size(&self) -> usize {
        self.read().entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the search ID is currently retained.
    pub fn contains(&self, id: &SearchId) -> bool {
        self.read().entries.contains_key(id)
    }

    // == Stats ==
    /// Returns current paging statistics.
    pub fn stats(&self) -> PagingStats {
        self.stats.snapshot(self.size(), self.capacity)
    }
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        PagingError::InvalidArgument(format!("{} must not be negative, got {}", name, value))
    })
}
