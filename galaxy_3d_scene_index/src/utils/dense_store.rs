/// Dense key → slot storage with compacting removal.
///
/// Values live contiguously in a single `Vec`, addressed through a
/// key → slot map. The key is the only stable handle: slots move when an
/// earlier value is removed, and the backing array may be reallocated when
/// it grows, so callers never keep slot indices or references across a
/// mutating call.
///
/// Costs:
/// - lookup: O(1)
/// - insert: O(1) amortized (grows by a fixed increment)
/// - remove: O(n) (shifts later slots down, renumbers their keys)
///
/// # Example
///
/// ```ignore
/// let mut store = DenseStore::new();
/// store.insert(10u64, "a");    // slot 0
/// store.insert(20u64, "b");    // slot 1
/// store.remove(10);            // "b" moves to slot 0
/// assert_eq!(store.slot_of(20), Some(0));
/// ```

use std::fmt::Debug;
use std::hash::Hash;
use rustc_hash::FxHashMap;

/// Number of slots added each time the backing array is full.
pub const DEFAULT_GROWTH_INCREMENT: usize = 64;

pub struct DenseStore<K, T> {
    /// Densely packed values, in insertion order
    values: Vec<T>,
    /// Key of the value at the same position in `values`
    slot_keys: Vec<K>,
    /// Key → position in `values`
    slots: FxHashMap<K, usize>,
    /// Fixed growth step of the backing arrays
    growth_increment: usize,
}

impl<K, T> DenseStore<K, T>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Create an empty store with no reserved slots
    pub fn new() -> Self {
        Self::with_capacity(0, DEFAULT_GROWTH_INCREMENT)
    }

    /// Create an empty store with `initial_capacity` reserved slots.
    ///
    /// A `growth_increment` of 0 is clamped to 1.
    pub fn with_capacity(initial_capacity: usize, growth_increment: usize) -> Self {
        let mut slots = FxHashMap::default();
        slots.reserve(initial_capacity);
        Self {
            values: Vec::with_capacity(initial_capacity),
            slot_keys: Vec::with_capacity(initial_capacity),
            slots,
            growth_increment: growth_increment.max(1),
        }
    }

    /// Store `value` under `key` in the next free slot.
    ///
    /// Returns `false` (and drops nothing, stores nothing) if `key` is already present.
    pub fn insert(&mut self, key: K, value: T) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }

        if self.values.len() == self.values.capacity() {
            self.values.reserve_exact(self.growth_increment);
            self.slot_keys.reserve_exact(self.growth_increment);
        }

        let slot = self.values.len();
        self.values.push(value);
        self.slot_keys.push(key);
        self.slots.insert(key, slot);
        true
    }

    /// Remove the value stored under `key`, compacting every later slot.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    pub fn remove(&mut self, key: K) -> T {
        let slot = match self.slots.remove(&key) {
            Some(slot) => slot,
            None => panic!("DenseStore::remove: key {:?} not present", key),
        };

        self.slot_keys.remove(slot);
        for shifted in &self.slot_keys[slot..] {
            if let Some(s) = self.slots.get_mut(shifted) {
                *s -= 1;
            }
        }
        self.values.remove(slot)
    }

    /// Value stored under `key`
    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(&key).map(|&slot| &self.values[slot])
    }

    /// Mutable value stored under `key`
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get(&key) {
            Some(&slot) => Some(&mut self.values[slot]),
            None => None,
        }
    }

    /// Whether `key` is stored
    pub fn contains_key(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    /// Current slot of `key` (changes whenever an earlier slot is removed)
    pub fn slot_of(&self, key: K) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    /// All live keys, in slot order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.slot_keys.iter().copied()
    }

    /// All live (key, value) pairs, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slot_keys.iter().copied().zip(self.values.iter())
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slots currently allocated in the backing array
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Fixed growth step of the backing array
    pub fn growth_increment(&self) -> usize {
        self.growth_increment
    }

    /// Drop every value (the backing allocation is kept)
    pub fn clear(&mut self) {
        self.values.clear();
        self.slot_keys.clear();
        self.slots.clear();
    }
}

impl<K, T> Default for DenseStore<K, T>
where
    K: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "dense_store_tests.rs"]
mod tests;
