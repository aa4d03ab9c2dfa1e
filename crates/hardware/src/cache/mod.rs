//! Cache storage model.
//!
//! The cache is held as a three-dimensional array indexed by way, set and
//! word-within-block. Each slot is either empty or holds the word-aligned
//! address of the word it caches; the stored address is the ground truth for
//! hit detection, so no separate tag or valid bit is kept.

/// Address field extraction (tag, index, block).
pub mod fields;

/// Single-bit pseudo-LRU replacement policy.
pub mod plru;

/// Injectable random sources for victim selection.
pub mod random;

pub use fields::{AddressFields, decode_fields};
pub use plru::PlruPolicy;
pub use random::{RandomSource, SequenceRandom, XorShiftRandom};

use crate::common::addr::Addr;
use crate::config::Geometry;

/// Contents of one word slot: `None` while never filled.
pub type Slot = Option<Addr>;

/// Way x set x block storage for cached word addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    slots: Vec<Slot>,
    ways: usize,
    sets: usize,
    block_size: usize,
}

impl CacheStore {
    /// Creates an empty store shaped by `geometry`.
    pub fn new(geometry: &Geometry) -> Self {
        let ways = geometry.associativity;
        let sets = geometry.num_sets;
        let block_size = geometry.block_size;
        Self {
            slots: vec![None; ways * sets * block_size],
            ways,
            sets,
            block_size,
        }
    }

    /// Number of ways.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets per way.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Number of words per block.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    const fn offset(&self, way: usize, set: usize) -> usize {
        (way * self.sets + set) * self.block_size
    }

    /// Returns the contents of one slot.
    ///
    /// # Panics
    ///
    /// Panics if `way`, `set` or `block` is out of range for this store.
    pub fn slot(&self, way: usize, set: usize, block: usize) -> Slot {
        assert!(block < self.block_size, "block {block} out of range");
        self.slots[self.offset(way, set) + block]
    }

    /// Returns the words of one block.
    pub fn block(&self, way: usize, set: usize) -> &[Slot] {
        let start = self.offset(way, set);
        &self.slots[start..start + self.block_size]
    }

    /// Iterates over the blocks of one way, in set order.
    pub fn way_blocks(&self, way: usize) -> impl Iterator<Item = &[Slot]> + '_ {
        let start = self.offset(way, 0);
        self.slots[start..start + self.sets * self.block_size].chunks(self.block_size)
    }

    /// Returns the first way whose slot at `(set, block)` holds the word `addr` names.
    pub fn find_word(&self, set: usize, block: usize, addr: Addr) -> Option<usize> {
        (0..self.ways).find(|&way| {
            self.slot(way, set, block)
                .is_some_and(|cached| cached.same_word(addr))
        })
    }

    /// Returns the first way whose slot at `(set, block)` is still empty.
    pub fn find_empty(&self, set: usize, block: usize) -> Option<usize> {
        (0..self.ways).find(|&way| self.slot(way, set, block).is_none())
    }

    /// Loads the whole block containing `addr` into `way` of `set`.
    ///
    /// The address is rounded down to the first word of its block and the
    /// block's words are written in order, one word (4 bytes) apart.
    pub fn fill_block(&mut self, addr: Addr, way: usize, set: usize, block_bits: u32) {
        let base = addr.block_base(block_bits);
        let start = self.offset(way, set);
        let block = &mut self.slots[start..start + self.block_size];
        for (k, slot) in block.iter_mut().enumerate() {
            *slot = Some(base.add_words(k as u32));
        }
    }

    /// Returns the contents as nested `way -> set -> block` vectors.
    pub fn snapshot(&self) -> Vec<Vec<Vec<Slot>>> {
        (0..self.ways)
            .map(|way| self.way_blocks(way).map(<[Slot]>::to_vec).collect())
            .collect()
    }

    /// Number of slots currently holding an address.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
