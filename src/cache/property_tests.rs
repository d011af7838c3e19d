//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, eviction order, paging windows and
//! concurrent access.

use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

use crate::cache::{PagingCache, ResourceRef, SearchId};
use crate::error::PagingError;

// == Strategies ==
/// Generates relative references like `Patient/abc1`
fn resource_ref_strategy() -> impl Strategy<Value = ResourceRef> {
    ("(Patient|Observation|Encounter)", "[a-z0-9]{1,12}")
        .prop_map(|(resource_type, id)| ResourceRef::new(format!("{}/{}", resource_type, id)))
}

fn result_set_strategy() -> impl Strategy<Value = Vec<ResourceRef>> {
    prop::collection::vec(resource_ref_strategy(), 0..40)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum PagingOp {
    Store { resources: Vec<ResourceRef> },
    Retrieve { slot: usize, offset: i64, count: i64 },
}

fn paging_op_strategy() -> impl Strategy<Value = PagingOp> {
    prop_oneof![
        result_set_strategy().prop_map(|resources| PagingOp::Store { resources }),
        (0usize..64, -2i64..50, -2i64..50)
            .prop_map(|(slot, offset, count)| PagingOp::Retrieve { slot, offset, count }),
    ]
}

/// Result set whose every element names its writer and store, so a mixed read is detectable
fn tagged_set(writer: usize, n: usize) -> Vec<ResourceRef> {
    let len = (writer + n) % 7 + 1;
    (0..len)
        .map(|i| ResourceRef::new(format!("Patient/w{}-s{}-{}", writer, n, i)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After every store the cache holds no more than its capacity.
    #[test]
    fn prop_capacity_bound(
        capacity in 1usize..12,
        sets in prop::collection::vec(result_set_strategy(), 1..60)
    ) {
        let cache = PagingCache::new(capacity);

        for set in sets {
            cache.store(set);
            prop_assert!(
                cache.size() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.size(),
                capacity
            );
        }
    }

    // Only the `capacity` most recently stored IDs survive, whatever was read in between.
    #[test]
    fn prop_fifo_eviction_order(
        capacity in 1usize..8,
        store_count in 1usize..30,
        reads in prop::collection::vec(0usize..30, 0..20)
    ) {
        let cache = PagingCache::new(capacity);
        let mut ids: Vec<SearchId> = Vec::new();

        for n in 0..store_count {
            ids.push(cache.store(vec![ResourceRef::new(format!("Patient/{}", n))]));
            // Reads must not change which entry goes next
            for slot in &reads {
                if let Some(id) = ids.get(*slot) {
                    let _ = cache.retrieve(id, 0, 1);
                }
            }
        }

        let retained_from = store_count.saturating_sub(capacity);
        for (index, id) in ids.iter().enumerate() {
            let result = cache.retrieve(id, 0, 1);
            if index < retained_from {
                prop_assert!(
                    matches!(result, Err(PagingError::NotFound(_))),
                    "Search {} should have been evicted",
                    index
                );
            } else {
                prop_assert_eq!(
                    result.unwrap(),
                    vec![ResourceRef::new(format!("Patient/{}", index))]
                );
            }
        }
    }

    // A window returns min(count, max(0, len - offset)) elements of the matching sub-sequence.
    #[test]
    fn prop_pagination_correctness(
        resources in result_set_strategy(),
        offset in 0i64..60,
        count in 0i64..60
    ) {
        let cache = PagingCache::new(4);
        let id = cache.store(resources.clone());

        let page = cache.retrieve(&id, offset, count).unwrap();

        let len = resources.len() as i64;
        let expected_len = count.min((len - offset).max(0)) as usize;
        prop_assert_eq!(page.len(), expected_len);

        let start = (offset as usize).min(resources.len());
        prop_assert_eq!(&page[..], &resources[start..start + expected_len]);
    }

    // Negative offsets or counts are always rejected, for known and unknown IDs alike.
    #[test]
    fn prop_negative_arguments_rejected(
        offset in -100i64..0,
        count in -100i64..0,
        known in any::<bool>()
    ) {
        let cache = PagingCache::new(2);
        let id = if known {
            cache.store(vec![ResourceRef::new("Patient/1")])
        } else {
            SearchId::from("nonexistent-id")
        };

        prop_assert!(matches!(
            cache.retrieve(&id, offset, 1),
            Err(PagingError::InvalidArgument(_))
        ));
        prop_assert!(matches!(
            cache.retrieve(&id, 0, count),
            Err(PagingError::InvalidArgument(_))
        ));
    }

    // Statistics agree with a straightforward model of the operation sequence.
    #[test]
    fn prop_statistics_accuracy(
        capacity in 1usize..6,
        ops in prop::collection::vec(paging_op_strategy(), 1..60)
    ) {
        let cache = PagingCache::new(capacity);
        let mut ids: Vec<SearchId> = Vec::new();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                PagingOp::Store { resources } => ids.push(cache.store(resources)),
                PagingOp::Retrieve { slot, offset, count } => {
                    let id = ids
                        .get(slot)
                        .cloned()
                        .unwrap_or_else(|| SearchId::from("never-issued"));
                    match cache.retrieve(&id, offset, count) {
                        Ok(_) => expected_hits += 1,
                        Err(PagingError::NotFound(_)) => expected_misses += 1,
                        Err(PagingError::InvalidArgument(_)) => {
                            prop_assert!(offset < 0 || count < 0);
                        }
                    }
                }
            }
        }

        let stats = cache.stats();
        let stores = ids.len() as u64;
        prop_assert_eq!(stats.stores, stores);
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.evictions, stores.saturating_sub(capacity as u64));
        prop_assert_eq!(stats.total_entries, cache.size());
    }
}

// Thread-based tests run fewer cases
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent readers racing with evicting writers see either a whole result set or NotFound.
    #[test]
    fn prop_concurrent_reads_never_tear(
        capacity in 1usize..4,
        writers in 2usize..5,
        stores_per_writer in 5usize..30
    ) {
        let cache = Arc::new(PagingCache::new(capacity));

        let handles: Vec<_> = (0..writers)
            .map(|writer| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || -> Result<(), String> {
                    for n in 0..stores_per_writer {
                        let expected = tagged_set(writer, n);
                        let id = cache.store(expected.clone());
                        match cache.retrieve(&id, 0, 100) {
                            Ok(page) if page == expected => {}
                            Ok(page) => {
                                return Err(format!("Torn read: {:?} != {:?}", page, expected));
                            }
                            Err(PagingError::NotFound(_)) => {}
                            Err(other) => return Err(other.to_string()),
                        }
                        if cache.size() > cache.capacity() {
                            return Err(format!("size {} over capacity", cache.size()));
                        }
                    }
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            let result = handle.join().expect("writer thread should not panic");
            prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.stores, (writers * stores_per_writer) as u64);
        prop_assert_eq!(stats.total_entries, capacity.min(writers * stores_per_writer));
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_at_capacity_evicts_exactly_one() {
        let cache = PagingCache::new(3);
        for n in 0..3 {
            cache.store(vec![ResourceRef::new(format!("Patient/{}", n))]);
        }
        assert_eq!(cache.stats().evictions, 0);

        cache.store(vec![ResourceRef::new("Patient/3")]);
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.size(), 3);
    }

    #[test]
    fn test_shared_handle_across_threads() {
        let cache = Arc::new(PagingCache::new(10));
        let id = cache.store(vec![ResourceRef::new("Patient/1")]);

        let reader = {
            let cache = Arc::clone(&cache);
            let id = id.clone();
            thread::spawn(move || cache.retrieve(&id, 0, 10))
        };

        let page = reader.join().unwrap().unwrap();
        assert_eq!(page, vec![ResourceRef::new("Patient/1")]);
    }
}
