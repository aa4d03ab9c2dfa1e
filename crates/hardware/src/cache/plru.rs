//! Single-bit Pseudo-LRU (PLRU) Replacement Policy.
//!
//! Each set keeps one bit. The ways of a set are split into a lower and an
//! upper half; the bit names the half to evict from next, and the way within
//! that half is chosen at random. With one or two ways this degenerates to
//! "way 0" and "the way the bit points at" respectively.
//!
//! The bit is written twice per access:
//! 1. On a hit or compulsory fill, it is set to `round((ways - way) / ways)`,
//!    rounding halves up.
//! 2. After every access to the set, whatever the outcome, it is flipped.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) for every operation.
//! - **Space Complexity:** one byte per set.

use super::random::RandomSource;

/// PLRU policy state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlruPolicy {
    /// One bit per set, stored as 0 or 1.
    usage: Vec<u8>,
    /// Number of ways in the cache.
    ways: usize,
}

impl PlruPolicy {
    /// Creates a new policy with every bit cleared.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: vec![0; sets],
            ways: ways.max(1),
        }
    }

    /// Returns the bit for `set`.
    pub fn bit(&self, set: usize) -> u8 {
        self.usage[set]
    }

    /// Returns every bit, indexed by set.
    pub fn bits(&self) -> &[u8] {
        &self.usage
    }

    /// Records a hit or compulsory fill of `way` in `set`.
    ///
    /// Sets the bit to `(ways - way) / ways` rounded half-up, which is 1 for
    /// every way except those in the upper half past its midpoint.
    pub fn touch(&mut self, set: usize, way: usize) {
        let remaining = self.ways.saturating_sub(way);
        self.usage[set] = u8::from(2 * remaining >= self.ways);
    }

    /// Chooses the way to evict from `set`.
    ///
    /// The bit selects a half of the ways and `rng` picks uniformly within it.
    /// A draw past the end of the half is clamped to its last way.
    pub fn victim<R: RandomSource + ?Sized>(&self, set: usize, rng: &mut R) -> usize {
        if self.ways <= 1 {
            return 0;
        }
        let half = self.ways / 2;
        let offset = rng.uniform(0, half - 1).min(half - 1);
        usize::from(self.usage[set]) * half + offset
    }

    /// Flips the bit for `set`.
    pub fn flip(&mut self, set: usize) {
        self.usage[set] ^= 1;
    }
}
