//! Open addressing with quadratic probing and tombstone deletion.
//!
//! Buckets move through `Empty -> Occupied -> Tombstoned -> Occupied`:
//! a tombstoned slot stays on the probe path so entries placed past it
//! remain discoverable, but any insert may reclaim it. Lookups that
//! miss walk the full probe range because an `Empty` slot is not proof
//! of absence once tombstones exist on the chain.
//!
//! The probe sequence is `(home + i^2) mod capacity` with capacity kept
//! prime by `prime::next_prime`. On a prime table the first
//! `(capacity + 1) / 2` probe offsets land on distinct buckets, so the
//! half-full load bound is exactly what keeps a free slot reachable.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::mem;

use crate::prime::{is_prime, next_prime, DEFAULT_CAPACITY};

/// One occupied bucket of a [`ProbingHashMap`].
///
/// Raw-slot iteration hands these out directly, including tombstoned
/// ones; callers are expected to check [`Slot::is_tombstone`]. A
/// tombstoned slot keeps its key and value until an insert reclaims
/// the bucket.
pub struct Slot<K, V> {
    key: K,
    value: V,
    tombstone: bool,
}

impl<K, V> Slot<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn is_tombstone(&self) -> bool {
        self.tombstone
    }
}

/// Hash map using quadratic-probing open addressing.
///
/// Capacity is always prime. An insert that would start at a load
/// factor of 0.5 or more first doubles the capacity (rounding up to
/// the next prime), so probe chains stay short and insertion always
/// finds a free slot.
pub struct ProbingHashMap<K, V, S = RandomState> {
    buckets: Vec<Option<Slot<K, V>>>,
    hasher: S,
    size: usize,
}

impl<K, V> ProbingHashMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates a map with the default capacity (11 buckets).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a map with at least `capacity` buckets, rounded up to
    /// the next prime. Degenerate requests (0, 1, 2) all yield 3.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> ProbingHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = next_prime(capacity);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        ProbingHashMap {
            buckets,
            hasher,
            size: 0,
        }
    }

    fn home_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn probe_index(&self, home: usize, i: usize) -> usize {
        (home + i * i) % self.buckets.len()
    }

    /// Index of the first live slot holding `key`, following the home
    /// fast path and then the full quadratic walk. Tombstoned slots are
    /// skipped even when their key matches, and an empty slot does not
    /// end the search.
    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let home = self.home_index(key);
        if let Some(slot) = &self.buckets[home] {
            if !slot.tombstone && slot.key.borrow() == key {
                return Some(home);
            }
        }

        for i in 0..self.buckets.len() {
            let index = self.probe_index(home, i);
            if let Some(slot) = &self.buckets[index] {
                if !slot.tombstone && slot.key.borrow() == key {
                    return Some(index);
                }
            }
        }
        None
    }

    /// Inserts or overwrites, returning the previous value when the
    /// probe walk reaches a live slot with an equal key.
    ///
    /// Empty and tombstoned slots are claimed as soon as the walk hits
    /// one, without comparing keys; claiming happens before any
    /// equal-key check on later slots, which is what makes tombstone
    /// reuse immediate.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.load_factor() >= 0.5 {
            let doubled = self.buckets.len() * 2;
            self.resize(doubled);
        }

        let home = self.home_index(&key);
        if self.buckets[home].as_ref().map_or(true, |s| s.tombstone) {
            self.buckets[home] = Some(Slot {
                key,
                value,
                tombstone: false,
            });
            self.size += 1;
            return None;
        }

        for i in 0..self.buckets.len() {
            let index = self.probe_index(home, i);
            match &mut self.buckets[index] {
                Some(slot) if !slot.tombstone => {
                    if slot.key == key {
                        return Some(mem::replace(&mut slot.value, value));
                    }
                }
                slot => {
                    *slot = Some(Slot {
                        key,
                        value,
                        tombstone: false,
                    });
                    self.size += 1;
                    return None;
                }
            }
        }

        // Unreachable while the load bound holds: a sub-half-full prime
        // table always has a free slot on the probe sequence.
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find_index(key)?;
        self.buckets[index].as_ref().map(|slot| &slot.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find_index(key)?;
        self.buckets[index].as_mut().map(|slot| &mut slot.value)
    }

    /// Unlike [`get`](Self::get), a tombstoned slot whose key matches
    /// answers `false` immediately instead of being skipped.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let home = self.home_index(key);
        if let Some(slot) = &self.buckets[home] {
            if slot.key.borrow() == key {
                return !slot.tombstone;
            }
        }

        for i in 0..self.buckets.len() {
            let index = self.probe_index(home, i);
            if let Some(slot) = &self.buckets[index] {
                if slot.key.borrow() == key {
                    return !slot.tombstone;
                }
            }
        }
        false
    }

    /// Tombstones the first live slot holding `key`. Returns whether an
    /// entry was deleted. Capacity never shrinks and the slot keeps its
    /// key and value until reused.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.find_index(key) {
            Some(index) => {
                if let Some(slot) = self.buckets[index].as_mut() {
                    slot.tombstone = true;
                }
                self.size -= 1;
                true
            }
            None => false,
        }
    }

    /// Rebuilds the table at `new_capacity` rounded up to a prime.
    ///
    /// A request below the current entry count is silently ignored.
    /// Live entries are re-inserted into a fresh table (dropping
    /// tombstones); the fresh table may grow further while it fills,
    /// and whatever capacity it ends up with is the capacity adopted
    /// here. A shrink that lands at or above the 0.5 load threshold
    /// triggers one more doubling so the growth invariant survives
    /// even deliberately tight requests.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let target = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
        };

        let mut fresh = ProbingHashMap::with_capacity_and_hasher(target, self.hasher.clone());
        for slot in mem::take(&mut self.buckets).into_iter().flatten() {
            if !slot.tombstone {
                fresh.insert(slot.key, slot.value);
            }
        }
        *self = fresh;

        if self.load_factor() >= 0.5 {
            let doubled = self.buckets.len() * 2;
            self.resize(doubled);
        }
    }
}

impl<K, V, S> ProbingHashMap<K, V, S> {
    /// Number of live entries. Tombstones do not count.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets. Always prime.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Live entries divided by buckets.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Buckets that are empty or tombstoned, i.e. capacity minus live
    /// entries.
    pub fn empty_buckets(&self) -> usize {
        self.buckets
            .iter()
            .filter(|b| b.as_ref().map_or(true, |slot| slot.tombstone))
            .count()
    }

    /// Live (key, value) pairs in bucket-index order. The order tracks
    /// placement, not insertion.
    pub fn pairs(&self) -> Vec<(&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .filter(|slot| !slot.tombstone)
            .map(|slot| (&slot.key, &slot.value))
            .collect()
    }

    /// Drops every entry, keeping capacity and hasher.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        self.buckets.clear();
        self.buckets.resize_with(capacity, || None);
        self.size = 0;
    }

    /// Forward iterator over raw slots in bucket-index order. Yields
    /// every non-empty slot, tombstoned ones included.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.buckets.iter(),
        }
    }
}

impl<K, V, S> Default for ProbingHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

/// See [`ProbingHashMap::iter`].
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Option<Slot<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Slot<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(Option::as_ref)
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingHashMap<K, V, S> {
    type Item = &'a Slot<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
