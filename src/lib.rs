//! prime-hashmap: hash tables with prime bucket counts and two
//! independent collision-resolution strategies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: provide the same map surface over two classic collision
//!   strategies so their mechanics can be compared and tested against
//!   each other.
//! - Layers:
//!   - `prime`: capacity policy. Every table rounds its requested
//!     bucket count up with `next_prime`; a prime count keeps the
//!     first half of the quadratic probe sequence on distinct buckets,
//!     which the 0.5 load bound turns into a free-slot guarantee.
//!   - `chain`: crate-private singly linked list owning its nodes,
//!     one per bucket of the chaining table.
//!   - `ProbingHashMap<K, V, S>`: open addressing with quadratic
//!     probing (`home + i^2 mod capacity`) and tombstone deletion.
//!   - `ChainingHashMap<K, V, S>`: one chain per bucket, head
//!     insertion, unlink on removal.
//!   - `mode::find_mode`: example client of the chaining table.
//!
//! Constraints
//! - Single-threaded; exclusive access is expressed through `&mut self`
//!   and nothing is `Sync`-aware.
//! - Capacity is always prime and never shrinks outside an explicit
//!   `resize` call.
//! - Open addressing keeps load below 0.5 at the start of every
//!   insert; chaining keeps it below 1.0. One insert may land past the
//!   threshold, the next insert grows the table.
//! - Tombstoned slots stay on the probe path, keep their key and
//!   value, and are reclaimed by any later insert that walks into
//!   them.
//!
//! Probing policy
//! - Misses scan the full probe range: an empty slot never ends a
//!   lookup early, because a tombstone left earlier on the chain may
//!   hide a live entry placed past it.
//! - `get` skips a tombstoned slot even when the key matches;
//!   `contains_key` answers `false` for that same slot immediately.
//!   The two can disagree only after home-slot reuse has left a stale
//!   live copy on the chain (see `ProbingHashMap::insert`).
//! - The home slot is claimed without a key comparison whenever it is
//!   empty or tombstoned. This makes tombstone reuse immediate and is
//!   kept as documented behavior.
//!
//! Resize semantics
//! - Both tables resize by rebuilding: construct a fresh table at the
//!   prime-rounded target, re-insert every live entry through the
//!   normal insert path, then adopt the fresh table's storage.
//! - The adopted capacity is whatever the rebuild actually produced;
//!   re-insertion may itself grow the fresh table, and a deliberately
//!   tight open-addressing shrink triggers one more doubling after
//!   adoption.
//!
//! Notes and non-goals
//! - No thread safety, persistence, or iteration-order guarantees.
//! - Removal never compacts: open addressing tombstones in place,
//!   chaining unlinks a node, capacity stays put either way.
//! - Raw-slot iteration on the probing table deliberately yields
//!   tombstoned slots; callers filter with `Slot::is_tombstone`.
//! - The byte-sum and weighted-sum hashers exist for reproducible
//!   placement in examples and tests, not for real hashing.

mod chain;
pub mod chaining_hash_map;
mod chaining_hash_map_proptest;
pub mod hash;
pub mod mode;
mod prime;
pub mod probing_hash_map;
mod probing_hash_map_proptest;

// Public surface
pub use chaining_hash_map::ChainingHashMap;
pub use hash::{ByteSumBuildHasher, ByteSumHasher, WeightedSumBuildHasher, WeightedSumHasher};
pub use mode::find_mode;
pub use prime::{is_prime, next_prime};
pub use probing_hash_map::{ProbingHashMap, Slot};
