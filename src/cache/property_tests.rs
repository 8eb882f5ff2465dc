//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{keys, TtlStore};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates keys in the shape the key scheme produces
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..20).prop_map(|id| keys::product(id)),
        (0u32..20).prop_map(|id| keys::user(id)),
        (0u32..20).prop_map(|id| keys::shop(id)),
        (prop::option::of("[a-z]{1,6}"), prop::option::of(1u32..4))
            .prop_map(|(category, page)| keys::products(category.as_deref(), page)),
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}"
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("product:".to_string()),
        Just("product".to_string()),
        Just("products:".to_string()),
        Just(":1".to_string()),
        "[a-z:0-9]{1,4}",
    ]
}

/// A sequence of cache operations
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Invalidate { pattern: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        pattern_strategy().prop_map(|pattern| CacheOp::Invalidate { pattern }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The store agrees with a plain HashMap model for any operation sequence,
    // and its hit/miss counters match what the model predicts.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let store = TtlStore::new();
        let mut model: HashMap<String, String> = HashMap::new();
        let mut hits = 0u64;
        let mut misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), TEST_TTL);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).cloned();
                    match &expected {
                        Some(_) => hits += 1,
                        None => misses += 1,
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
                CacheOp::Invalidate { pattern } => {
                    let before = model.len();
                    model.retain(|key, _| !key.contains(&pattern));
                    prop_assert_eq!(store.remove_matching(&pattern), before - model.len());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // Invalidation removes exactly the keys containing the pattern.
    #[test]
    fn prop_invalidation_removes_exact_set(
        stored in prop::collection::hash_set(key_strategy(), 0..40),
        pattern in pattern_strategy()
    ) {
        let store = TtlStore::new();
        for key in &stored {
            store.set(key.clone(), (), TEST_TTL);
        }

        store.remove_matching(&pattern);

        let expected: HashSet<String> = stored
            .iter()
            .filter(|key| !key.contains(pattern.as_str()))
            .cloned()
            .collect();
        let actual: HashSet<String> = store.keys().into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    // Last write wins.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let store = TtlStore::new();

        store.set(key.clone(), value1, TEST_TTL);
        store.set(key.clone(), value2.clone(), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Builders are pure: same inputs, same key.
    #[test]
    fn prop_key_determinism(
        category in prop::option::of("[a-z]{1,12}"),
        page in prop::option::of(1u32..500),
        id in any::<u64>()
    ) {
        prop_assert_eq!(
            keys::products(category.as_deref(), page),
            keys::products(category.as_deref(), page)
        );
        prop_assert_eq!(keys::product(id), keys::product(id));
        prop_assert_eq!(
            keys::products(None, page),
            keys::products(Some(keys::ALL_CATEGORIES), page)
        );
        prop_assert_eq!(
            keys::products(category.as_deref(), None),
            keys::products(category.as_deref(), Some(keys::FIRST_PAGE))
        );
    }

    // Deleting twice never fails and reports absence the second time.
    #[test]
    fn prop_delete_idempotent(key in key_strategy()) {
        let store: TtlStore<u8> = TtlStore::new();
        store.set(key.clone(), 1, TEST_TTL);

        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert!(store.get(&key).is_none());
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // A value is visible before its TTL and gone, storage included, after one
    // read past expiry.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        let store = TtlStore::new();

        store.set(key.clone(), value.clone(), Duration::from_millis(40));
        prop_assert_eq!(store.get(&key), Some(value));

        sleep(Duration::from_millis(70));

        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.len(), 0);
    }
}
