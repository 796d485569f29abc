//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check size accounting and recency ordering over
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::cache::LruCache;

// == Strategies ==
/// Generates keys from a small alphabet so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,24}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: String },
    Get { key: String },
    Remove { key: String },
    RemoveOldest,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Add { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::RemoveOldest),
    ]
}

fn apply(cache: &mut LruCache<String>, op: CacheOp) {
    match op {
        CacheOp::Add { key, value } => cache.add(key, value),
        CacheOp::Get { key } => {
            cache.get(&key);
        }
        CacheOp::Remove { key } => {
            cache.remove(&key);
        }
        CacheOp::RemoveOldest => {
            cache.remove_oldest();
        }
    }
}

/// Sums `key.len() + value.len()` over every resident entry from scratch.
fn recomputed_size(cache: &LruCache<String>) -> usize {
    cache
        .keys()
        .map(|key| key.len() + cache.peek(key).map_or(0, |value| value.len()))
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // After every operation the byte total stays within a non-zero capacity.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..64,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut cache = LruCache::new(capacity);

        for op in ops {
            apply(&mut cache, op);
            prop_assert!(
                cache.size() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.size(),
                capacity
            );
        }
    }

    // The running size always equals a full recomputation, and the key
    // index and the recency list describe the same set of keys.
    #[test]
    fn prop_size_matches_recomputation(
        capacity in 0usize..64,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut cache = LruCache::new(capacity);

        for op in ops {
            apply(&mut cache, op);

            prop_assert_eq!(cache.size(), recomputed_size(&cache));

            let listed: Vec<&str> = cache.keys().collect();
            let unique: HashSet<&str> = listed.iter().copied().collect();
            prop_assert_eq!(listed.len(), unique.len(), "Duplicate key in recency list");
            prop_assert_eq!(listed.len(), cache.len());
            for key in &listed {
                prop_assert!(cache.contains(key), "Listed key '{}' missing from index", key);
            }
        }
    }

    // Storing a pair and reading it back returns the stored value while it fits.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut cache = LruCache::new(0);

        cache.add(key.clone(), value.clone());

        prop_assert_eq!(cache.get(&key), Some(&value));
    }

    // Overwriting changes the size by exactly the difference in value size.
    #[test]
    fn prop_update_delta(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = LruCache::new(0);
        cache.add("other", "filler".to_string());
        cache.add(key.clone(), value1.clone());
        let before = cache.size();
        let len_before = cache.len();

        cache.add(key.clone(), value2.clone());

        prop_assert_eq!(
            cache.size() as isize - before as isize,
            value2.len() as isize - value1.len() as isize
        );
        prop_assert_eq!(cache.len(), len_before);
        prop_assert_eq!(cache.get(&key), Some(&value2));
    }

    // A key read after filling becomes most recently used, so the next
    // eviction takes the second-oldest key instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::hash_set("[a-z]{4}", 3..8),
        access_index in 0usize..8
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        // Each entry costs 4 + 4 = 8 bytes
        let capacity = keys.len() * 8;
        let mut cache = LruCache::new(capacity);
        for key in &keys {
            cache.add(key.clone(), "vvvv".to_string());
        }

        let touched = keys[access_index % keys.len()].clone();
        cache.get(&touched);
        let expected_evicted = keys
            .iter()
            .find(|key| **key != touched)
            .cloned()
            .unwrap();

        cache.add("NEW!", "vvvv".to_string());

        prop_assert!(cache.contains(&touched), "Touched key '{}' was evicted", touched);
        prop_assert!(
            !cache.contains(&expected_evicted),
            "Key '{}' should have been evicted",
            expected_evicted
        );
        prop_assert_eq!(cache.len(), keys.len());
    }

    // The callback fires once per recorded eviction, never on an
    // unbounded cache.
    #[test]
    fn prop_callback_accounts_for_evictions(
        capacity in 0usize..48,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..60)
    ) {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let mut cache = LruCache::with_eviction_callback(capacity, move |key, _value: String| {
            sink.lock().unwrap().push(key);
        });

        for (key, value) in entries {
            cache.add(key, value);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.evictions as usize, evicted.lock().unwrap().len());
        if capacity == 0 {
            prop_assert!(evicted.lock().unwrap().is_empty());
        }
    }
}
