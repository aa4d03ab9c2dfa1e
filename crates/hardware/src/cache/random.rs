//! Random sources for victim selection.
//!
//! Eviction picks a way at random within the pseudo-LRU group, so the engine
//! draws from a [`RandomSource`] rather than a global generator. The default
//! source is a small xorshift generator; tests substitute scripted sources
//! to replay exact eviction sequences.

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `lo..=hi`.
    ///
    /// Implementations must stay within `lo..=hi` and return `lo` when
    /// `hi <= lo`. Callers still clamp the result before using it as an index.
    fn uniform(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        (**self).uniform(lo, hi)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        (**self).uniform(lo, hi)
    }
}

/// Xorshift64 generator.
///
/// Cheap and reproducible for a given seed; not suitable for anything but
/// simulation.
#[derive(Debug, Clone)]
pub struct XorShiftRandom {
    state: u64,
}

impl XorShiftRandom {
    /// Seed used when none is given. Xorshift must never be seeded with zero.
    pub const DEFAULT_SEED: u64 = 123456789;

    /// Creates a generator from a seed; a zero seed falls back to [`Self::DEFAULT_SEED`].
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { Self::DEFAULT_SEED } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for XorShiftRandom {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl RandomSource for XorShiftRandom {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % span) as usize
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Each draw is clamped into the requested range.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    pos: usize,
}

impl SequenceRandom {
    /// Creates a source that yields `values` in order.
    pub const fn new(values: Vec<usize>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        let Some(&value) = self.values.get(self.pos % self.values.len().max(1)) else {
            return lo;
        };
        self.pos += 1;
        value.clamp(lo, hi.max(lo))
    }
}
