//! Separate chaining: one singly linked [`Chain`] per bucket.
//!
//! Collisions grow the bucket's chain instead of spilling into other
//! buckets, so the table tolerates any load; an insert that would start
//! at load factor 1.0 doubles the capacity first to keep chains short.
//! Capacity follows the same prime policy as the probing table.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::mem;

use crate::chain::Chain;
use crate::prime::{is_prime, next_prime, DEFAULT_CAPACITY};

/// Hash map using separate chaining.
pub struct ChainingHashMap<K, V, S = RandomState> {
    buckets: Vec<Chain<K, V>>,
    hasher: S,
    size: usize,
}

impl<K, V> ChainingHashMap<K, V>
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

impl<K, V, S> ChainingHashMap<K, V, S>
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
        buckets.resize_with(capacity, Chain::new);
        ChainingHashMap {
            buckets,
            hasher,
            size: 0,
        }
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Inserts or overwrites, returning the previous value when the
    /// bucket's chain already holds an equal key. New entries go in at
    /// the head of the chain.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.load_factor() >= 1.0 {
            let doubled = self.buckets.len() * 2;
            self.resize(doubled);
        }

        let index = self.bucket_index(&key);
        match self.buckets[index].get_mut(&key) {
            Some(old) => Some(mem::replace(old, value)),
            None => {
                self.buckets[index].push_front(key, value);
                self.size += 1;
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        self.buckets[index].get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        self.buckets[index].get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Unlinks the entry for `key` from its chain. Returns whether an
    /// entry was deleted.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        if self.buckets[index].remove(key).is_some() {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    /// Rebuilds the table at `new_capacity` rounded up to a prime.
    ///
    /// Requests below 1 are ignored. A request of exactly 2 is treated
    /// as 4, so the smallest non-trivial capacity a resize can produce
    /// is 5. Every entry is re-inserted into a fresh table, which may
    /// grow further while it fills; the capacity finally adopted is
    /// whatever the fresh table ends up with, never assumed equal to
    /// the request.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let mut target = new_capacity;
        if target == 2 {
            target = 4;
        }
        if !is_prime(target) {
            target = next_prime(target);
        }

        let mut fresh = ChainingHashMap::with_capacity_and_hasher(target, self.hasher.clone());
        for chain in mem::take(&mut self.buckets) {
            for (key, value) in chain {
                fresh.insert(key, value);
            }
        }
        *self = fresh;
    }
}

impl<K, V, S> ChainingHashMap<K, V, S> {
    /// Number of entries across all chains.
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

    /// Entries divided by buckets. Can reach exactly 1.0 after an
    /// insert or a tight resize, never more.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Buckets whose chain is empty.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// (key, value) pairs in bucket-index order, then chain order
    /// (newest first) within a bucket.
    pub fn pairs(&self) -> Vec<(&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter())
            .collect()
    }

    /// Drops every entry, keeping capacity and hasher.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        self.buckets.clear();
        self.buckets.resize_with(capacity, Chain::new);
        self.size = 0;
    }
}

impl<K, V, S> Default for ChainingHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::ByteSumBuildHasher;

    /// Invariant: construction rounds the requested capacity up to the
    /// next prime; 0, 1 and 2 all land on 3.
    #[test]
    fn constructor_rounds_capacity_to_prime() {
        for (requested, expect) in [(0, 3), (1, 3), (2, 3), (10, 11), (11, 11), (20, 23)] {
            let m: ChainingHashMap<String, i32> = ChainingHashMap::with_capacity(requested);
            assert_eq!(m.capacity(), expect, "requested {requested}");
            assert_eq!(m.len(), 0);
            assert_eq!(m.empty_buckets(), expect);
        }
        let m: ChainingHashMap<String, i32> = ChainingHashMap::new();
        assert_eq!(m.capacity(), 11);
    }

    /// Invariant: insert/get round-trip; a second insert of the same key
    /// overwrites the chain node in place and returns the old value.
    #[test]
    fn insert_get_overwrite() {
        let mut m = ChainingHashMap::new();
        assert_eq!(m.insert("key1".to_string(), 10), None);
        assert_eq!(m.get("key1"), Some(&10));
        assert_eq!(m.len(), 1);

        assert_eq!(m.insert("key1".to_string(), 30), Some(10));
        assert_eq!(m.get("key1"), Some(&30));
        assert_eq!(m.len(), 1);

        assert_eq!(m.get("key2"), None);
        if let Some(v) = m.get_mut("key1") {
            *v += 1;
        }
        assert_eq!(m.get("key1"), Some(&31));
    }

    /// Invariant: colliding keys share one bucket's chain, newest at the
    /// head; pairs reports bucket order, then head-to-tail chain order.
    #[test]
    fn collisions_chain_in_one_bucket() {
        // Byte sums: "a" -> bucket 0, "b" -> bucket 1, "ab"/"ba" ->
        // bucket 10 of an 11-bucket table.
        let mut m = ChainingHashMap::with_capacity_and_hasher(11, ByteSumBuildHasher);
        m.insert("ab".to_string(), 1);
        m.insert("ba".to_string(), 2);
        m.insert("a".to_string(), 3);
        m.insert("b".to_string(), 4);

        assert_eq!(m.len(), 4);
        assert_eq!(m.capacity(), 11);
        assert_eq!(m.empty_buckets(), 8);

        let got: Vec<(&str, i32)> = m.pairs().iter().map(|(k, v)| (k.as_str(), **v)).collect();
        assert_eq!(got, [("a", 3), ("b", 4), ("ba", 2), ("ab", 1)]);
    }

    /// Invariant: removing unlinks only the matching node; head,
    /// interior, and absent removals behave.
    #[test]
    fn remove_unlinks_single_node() {
        let mut m = ChainingHashMap::with_capacity_and_hasher(11, ByteSumBuildHasher);
        m.insert("ab".to_string(), 1);
        m.insert("ba".to_string(), 2);
        m.insert("abc".to_string(), 3); // same bucket as the other two

        assert!(m.remove("ba"));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("ba"), None);
        assert!(!m.contains_key("ba"));
        assert_eq!(m.get("ab"), Some(&1));
        assert_eq!(m.get("abc"), Some(&3));

        assert!(!m.remove("ba"));
        assert_eq!(m.len(), 2);
    }

    /// Invariant: an insert beginning at load >= 1.0 doubles capacity
    /// to the next prime first; `len <= capacity` after every insert.
    #[test]
    fn growth_trips_at_full_load() {
        let mut m = ChainingHashMap::with_capacity(3);
        for i in 0..3 {
            m.insert(format!("key{i}"), i);
            assert!(m.len() <= m.capacity());
        }
        // Three entries in three buckets: full, but growth waits for
        // the next insert.
        assert_eq!(m.capacity(), 3);
        assert_eq!(m.load_factor(), 1.0);

        m.insert("key3".to_string(), 3);
        assert_eq!(m.capacity(), 7);
        assert_eq!(m.len(), 4);
        for i in 0..4 {
            assert_eq!(m.get(format!("key{i}").as_str()), Some(&i));
        }
    }

    /// Invariant: resize ignores requests below 1, treats 2 as 4, and
    /// adopts whatever capacity the rebuild actually produces.
    #[test]
    fn resize_boundary_rules() {
        let mut m = ChainingHashMap::new();
        for i in 0..5 {
            m.insert(format!("key{i}"), i);
        }

        m.resize(0);
        assert_eq!(m.capacity(), 11);

        // 2 is treated as 4, priming to 5: five entries exactly fill it.
        m.resize(2);
        assert_eq!(m.capacity(), 5);
        assert_eq!(m.len(), 5);
        assert_eq!(m.load_factor(), 1.0);
        for i in 0..5 {
            assert_eq!(m.get(format!("key{i}").as_str()), Some(&i));
        }

        // A request of 1 primes to 3; re-inserting five entries trips
        // the load check mid-rebuild and the grown capacity is adopted.
        m.resize(1);
        assert_eq!(m.capacity(), 7);
        assert_eq!(m.len(), 5);
        for i in 0..5 {
            assert_eq!(m.get(format!("key{i}").as_str()), Some(&i));
        }
    }

    /// Invariant: clear empties every chain but keeps capacity and
    /// hasher.
    #[test]
    fn clear_keeps_capacity() {
        let mut m = ChainingHashMap::with_capacity(23);
        for i in 0..10 {
            m.insert(format!("key{i}"), i);
        }

        m.clear();
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 23);
        assert_eq!(m.empty_buckets(), 23);
        assert!(m.pairs().is_empty());
        assert_eq!(m.get("key1"), None);

        m.insert("key1".to_string(), 1);
        assert_eq!(m.get("key1"), Some(&1));
    }

    /// Invariant: load factor counts entries, not chain shape, and
    /// ignores overwrites.
    #[test]
    fn load_factor_tracks_entries() {
        let mut m = ChainingHashMap::with_capacity(101);
        assert_eq!(m.load_factor(), 0.0);
        m.insert("key1".to_string(), 10);
        assert_eq!(m.load_factor(), 1.0 / 101.0);
        m.insert("key2".to_string(), 20);
        assert_eq!(m.load_factor(), 2.0 / 101.0);
        m.insert("key1".to_string(), 30);
        assert_eq!(m.load_factor(), 2.0 / 101.0);
    }
}
