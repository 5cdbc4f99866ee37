use super::*;

// ============================================================================
// Insert / lookup tests
// ============================================================================

#[test]
fn test_new_is_empty() {
    let store: DenseStore<u64, i32> = DenseStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.keys().count(), 0);
}

#[test]
fn test_default_is_empty() {
    let store: DenseStore<u64, i32> = DenseStore::default();
    assert!(store.is_empty());
    assert_eq!(store.growth_increment(), DEFAULT_GROWTH_INCREMENT);
}

#[test]
fn test_insert_assigns_sequential_slots() {
    let mut store = DenseStore::new();
    assert!(store.insert(100u64, 'a'));
    assert!(store.insert(7u64, 'b'));
    assert!(store.insert(42u64, 'c'));

    assert_eq!(store.slot_of(100), Some(0));
    assert_eq!(store.slot_of(7), Some(1));
    assert_eq!(store.slot_of(42), Some(2));
    assert_eq!(store.get(7), Some(&'b'));
}

#[test]
fn test_insert_duplicate_key_is_rejected() {
    let mut store = DenseStore::new();
    assert!(store.insert(1u64, "first"));
    assert!(!store.insert(1u64, "second"));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1), Some(&"first"));
}

#[test]
fn test_get_missing_key() {
    let mut store: DenseStore<u64, i32> = DenseStore::new();
    assert!(store.get(3).is_none());
    assert!(store.get_mut(3).is_none());
    assert!(!store.contains_key(3));
    assert!(store.slot_of(3).is_none());
}

#[test]
fn test_get_mut_modifies_in_place() {
    let mut store = DenseStore::new();
    store.insert(5u64, 10);
    *store.get_mut(5).unwrap() += 1;
    assert_eq!(store.get(5), Some(&11));
}

// ============================================================================
// Growth tests
// ============================================================================

#[test]
fn test_growth_by_fixed_increment() {
    let mut store = DenseStore::with_capacity(2, 4);
    assert!(store.capacity() >= 2);

    for key in 0..3u64 {
        store.insert(key, key * 10);
    }
    // Third insert hit a full array and grew it
    assert!(store.capacity() >= 6);

    // Values survive relocation
    for key in 0..3u64 {
        assert_eq!(store.get(key), Some(&(key * 10)));
    }
}

#[test]
fn test_zero_growth_increment_is_clamped() {
    let mut store = DenseStore::with_capacity(0, 0);
    assert_eq!(store.growth_increment(), 1);
    for key in 0..10u64 {
        assert!(store.insert(key, ()));
    }
    assert_eq!(store.len(), 10);
}

// ============================================================================
// Compacting removal tests
// ============================================================================

#[test]
fn test_remove_shifts_later_slots_down() {
    let mut store = DenseStore::new();
    for key in [10u64, 20, 30, 40] {
        store.insert(key, key);
    }

    assert_eq!(store.remove(20), 20);

    assert_eq!(store.len(), 3);
    assert_eq!(store.slot_of(10), Some(0));
    assert_eq!(store.slot_of(30), Some(1));
    assert_eq!(store.slot_of(40), Some(2));
    assert!(!store.contains_key(20));
    // Relative order preserved
    assert_eq!(store.keys().collect::<Vec<_>>(), vec![10, 30, 40]);
    assert_eq!(store.get(40), Some(&40));
}

#[test]
fn test_remove_last_slot() {
    let mut store = DenseStore::new();
    store.insert(1u64, 'x');
    store.insert(2u64, 'y');

    store.remove(2);
    assert_eq!(store.slot_of(1), Some(0));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_reinsert_after_remove() {
    let mut store = DenseStore::new();
    store.insert(1u64, 'x');
    store.remove(1);
    assert!(store.insert(1u64, 'z'));
    assert_eq!(store.get(1), Some(&'z'));
}

#[test]
#[should_panic(expected = "not present")]
fn test_remove_missing_key_panics() {
    let mut store: DenseStore<u64, i32> = DenseStore::new();
    store.insert(1, 1);
    store.remove(2);
}

#[test]
fn test_iter_pairs_keys_with_values() {
    let mut store = DenseStore::new();
    store.insert(3u64, "c");
    store.insert(1u64, "a");

    let pairs: Vec<_> = store.iter().collect();
    assert_eq!(pairs, vec![(3, &"c"), (1, &"a")]);
}

#[test]
fn test_clear() {
    let mut store = DenseStore::new();
    for key in 0..5u64 {
        store.insert(key, key);
    }
    store.clear();
    assert!(store.is_empty());
    assert!(!store.contains_key(0));
    assert!(store.insert(0u64, 99));
}

// ============================================================================
// Stress / pattern tests
// ============================================================================

#[test]
fn test_interleaved_insert_remove_keeps_map_consistent() {
    let mut store = DenseStore::new();
    for key in 0..100u64 {
        store.insert(key, key as i64 * 2);
    }
    for key in (0..100u64).filter(|k| k % 3 == 0) {
        store.remove(key);
    }

    // Every live key still resolves to its own value, slots are dense
    let mut seen_slots = std::collections::HashSet::new();
    for key in store.keys().collect::<Vec<_>>() {
        assert_eq!(store.get(key), Some(&(key as i64 * 2)));
        let slot = store.slot_of(key).unwrap();
        assert!(slot < store.len());
        assert!(seen_slots.insert(slot), "duplicate slot {}", slot);
    }
    assert_eq!(seen_slots.len(), store.len());
}
