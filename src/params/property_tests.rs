//! Property-Based Tests for Parameter Module
//!
//! Uses proptest to check the reload and expiry rules over generated key sets.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::ParamError;
use crate::params::{ManualClock, ParameterSet};
use crate::store::InMemoryParameterStore;

// == Strategies ==
/// Generates parameter names in the usual path style
fn name_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}/[a-z_]{1,12}".prop_map(|s| s)
}

/// Generates parameter values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

/// Generates a distinct, non-empty key list with a value for each key
fn populated_keys_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::hash_map(name_strategy(), value_strategy(), 1..12)
        .prop_map(|map| map.into_iter().collect())
}

fn build(
    pairs: &[(String, String)],
    expiry_ms: u64,
) -> (Arc<InMemoryParameterStore>, Arc<ManualClock>, ParameterSet) {
    let store = Arc::new(InMemoryParameterStore::with_values(pairs.iter().cloned()));
    let clock = Arc::new(ManualClock::new(0));
    let set = ParameterSet::with_clock(
        store.clone(),
        pairs.iter().map(|(k, _)| k.clone()),
        expiry_ms,
        clock.clone(),
    );
    (store, clock, set)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every successful reload leaves a value for every configured key.
    #[test]
    fn prop_successful_reload_is_complete(pairs in populated_keys_strategy()) {
        let (_, _, set) = build(&pairs, 1_000);

        tokio_test::block_on(set.reload()).unwrap();

        let snapshot = set.snapshot();
        for (key, value) in &pairs {
            prop_assert_eq!(snapshot.items.get(key), Some(value));
        }
    }

    // A response missing any configured key leaves the cache exactly as it was.
    #[test]
    fn prop_missing_keys_leave_cache_untouched(
        pairs in populated_keys_strategy(),
        dropped in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
        loaded_first in any::<bool>()
    ) {
        let (store, clock, set) = build(&pairs, 1_000);

        if loaded_first {
            tokio_test::block_on(set.reload()).unwrap();
            clock.advance(2_000);
        }
        let before = set.snapshot();

        let removed: HashSet<String> = dropped
            .iter()
            .map(|idx| pairs[idx.index(pairs.len())].0.clone())
            .collect();
        for key in &removed {
            store.remove(key);
        }

        let result = tokio_test::block_on(set.reload());
        match result {
            Err(ParamError::MissingKeys(missing)) => {
                let missing: HashSet<String> = missing.into_iter().collect();
                prop_assert_eq!(missing, removed);
            }
            other => prop_assert!(false, "expected missing keys, got {:?}", other),
        }
        prop_assert_eq!(set.snapshot(), before);
    }

    // Reads up to T+E are served from cache; the first read after that reloads once.
    #[test]
    fn prop_ttl_respected(
        pairs in populated_keys_strategy(),
        loaded_at in 0u64..1_000_000,
        expiry_ms in 1u64..100_000,
        offsets in prop::collection::vec(0u64..100_000, 1..10)
    ) {
        let (store, clock, set) = build(&pairs, expiry_ms);
        let key = pairs[0].0.clone();

        clock.set(loaded_at);
        tokio_test::block_on(set.get(&key)).unwrap();
        prop_assert_eq!(set.snapshot().expires_at, Some(loaded_at + expiry_ms));

        for offset in offsets {
            clock.set(loaded_at + offset.min(expiry_ms));
            tokio_test::block_on(set.get(&key)).unwrap();
        }
        prop_assert_eq!(store.calls(), 1);

        clock.set(loaded_at + expiry_ms + 1);
        tokio_test::block_on(set.get(&key)).unwrap();
        prop_assert_eq!(store.calls(), 2);
    }

    // With zero expiry one load serves every later read.
    #[test]
    fn prop_zero_expiry_loads_once(
        pairs in populated_keys_strategy(),
        times in prop::collection::vec(any::<u64>(), 1..20)
    ) {
        let (store, clock, set) = build(&pairs, 0);
        let expected: HashMap<String, String> = pairs.iter().cloned().collect();

        for (i, now) in times.into_iter().enumerate() {
            clock.set(now);
            let (key, _) = &pairs[i % pairs.len()];
            let value = tokio_test::block_on(set.get(key)).unwrap();
            prop_assert_eq!(value.as_ref(), expected.get(key));
        }
        prop_assert_eq!(store.calls(), 1);
    }
}
