//! Deterministic demonstration hashers.
//!
//! Both tables default to `RandomState`, but every constructor accepts
//! any `BuildHasher`, and these two are shipped for callers (and tests)
//! that want fully reproducible placement. `ByteSumHasher` ignores byte
//! order, so anagram keys collide and probe chains form on demand;
//! `WeightedSumHasher` weights each byte by its position and tells
//! anagrams apart. Neither is suitable as a general-purpose hash.

use std::hash::{BuildHasher, Hasher};

/// Sums every byte written, wrapping. Order-insensitive.
#[derive(Clone, Default)]
pub struct ByteSumHasher {
    state: u64,
}

impl Hasher for ByteSumHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_add(b as u64);
        }
    }
}

/// Builds [`ByteSumHasher`]s. Stateless, so every instance produces
/// identical hashes.
#[derive(Clone, Copy, Default)]
pub struct ByteSumBuildHasher;

impl BuildHasher for ByteSumBuildHasher {
    type Hasher = ByteSumHasher;

    fn build_hasher(&self) -> ByteSumHasher {
        ByteSumHasher::default()
    }
}

/// Sums `position * byte` over every byte written, wrapping. The
/// position counter runs across `write` calls, so split writes hash
/// the same as one contiguous write.
#[derive(Clone, Default)]
pub struct WeightedSumHasher {
    state: u64,
    index: u64,
}

impl Hasher for WeightedSumHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_add(self.index.wrapping_mul(b as u64));
            self.index += 1;
        }
    }
}

/// Builds [`WeightedSumHasher`]s. Stateless, like
/// [`ByteSumBuildHasher`].
#[derive(Clone, Copy, Default)]
pub struct WeightedSumBuildHasher;

impl BuildHasher for WeightedSumBuildHasher {
    type Hasher = WeightedSumHasher;

    fn build_hasher(&self) -> WeightedSumHasher {
        WeightedSumHasher::default()
    }
}
