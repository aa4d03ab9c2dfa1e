//! Cache Store Unit Tests.
//!
//! Verifies the way x set x block storage: initial emptiness, whole-block
//! fills from the block's first word, and the lookup helpers the engine uses.
//!
//! The store is constructed directly from a `Geometry`; no simulator needed.

use lwcache_core::cache::CacheStore;
use lwcache_core::{Addr, Geometry};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// 2 ways, 2 sets, 4-word blocks.
fn small_store() -> (Geometry, CacheStore) {
    let geometry = Geometry::clamped(16, 4, 2);
    let store = CacheStore::new(&geometry);
    (geometry, store)
}

#[test]
fn new_store_is_empty_and_shaped() {
    let (_, store) = small_store();
    assert_eq!(store.ways(), 2);
    assert_eq!(store.sets(), 2);
    assert_eq!(store.block_size(), 4);
    assert_eq!(store.occupied(), 0);
    assert_eq!(store.snapshot(), vec![vec![vec![None; 4]; 2]; 2]);
}

#[test]
fn fill_block_starts_at_block_boundary() {
    let (geometry, mut store) = small_store();
    // 0x1E sits in word 3 of the block starting at 0x10.
    store.fill_block(Addr(0x0000_001E), 1, 1, geometry.block_bits);

    assert_eq!(
        store.block(1, 1),
        &[
            Some(Addr(0x10)),
            Some(Addr(0x14)),
            Some(Addr(0x18)),
            Some(Addr(0x1C)),
        ]
    );
    // Nothing else was touched.
    assert_eq!(store.occupied(), 4);
    assert!(store.block(0, 1).iter().all(Option::is_none));
}

#[test]
fn fill_block_overwrites_previous_contents() {
    let (geometry, mut store) = small_store();
    store.fill_block(Addr(0x00), 0, 0, geometry.block_bits);
    store.fill_block(Addr(0x40), 0, 0, geometry.block_bits);
    assert_eq!(store.slot(0, 0, 0), Some(Addr(0x40)));
    assert_eq!(store.slot(0, 0, 3), Some(Addr(0x4C)));
    assert_eq!(store.occupied(), 4);
}

#[test]
fn find_word_ignores_byte_offset() {
    let (geometry, mut store) = small_store();
    store.fill_block(Addr(0x20), 1, 0, geometry.block_bits);
    assert_eq!(store.find_word(0, 2, Addr(0x2B)), Some(1));
    assert_eq!(store.find_word(0, 2, Addr(0x6B)), None);
}

#[test]
fn find_empty_returns_lowest_free_way() {
    let (geometry, mut store) = small_store();
    assert_eq!(store.find_empty(1, 0), Some(0));
    store.fill_block(Addr(0x10), 0, 1, geometry.block_bits);
    assert_eq!(store.find_empty(1, 0), Some(1));
    store.fill_block(Addr(0x30), 1, 1, geometry.block_bits);
    assert_eq!(store.find_empty(1, 0), None);
}

#[test]
fn way_blocks_iterates_sets_in_order() {
    let (geometry, mut store) = small_store();
    store.fill_block(Addr(0x10), 0, 1, geometry.block_bits);
    let rows: Vec<_> = store.way_blocks(0).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].iter().all(Option::is_none));
    assert_eq!(rows[1][0], Some(Addr(0x10)));
}

proptest! {
    #[test]
    fn fill_writes_consecutive_aligned_words(
        addr in any::<u32>(),
        block_log in 0u32..=4,
        assoc_log in 0u32..=2,
    ) {
        let geometry = Geometry::clamped(64, 1 << block_log, 1 << assoc_log);
        let mut store = CacheStore::new(&geometry);
        let way = geometry.associativity - 1;
        let set = geometry.num_sets - 1;
        store.fill_block(Addr(addr), way, set, geometry.block_bits);

        let block_bytes = (geometry.block_size as u32) * 4;
        let base = addr - addr % block_bytes;
        for (k, slot) in store.block(way, set).iter().enumerate() {
            prop_assert_eq!(*slot, Some(Addr(base + 4 * k as u32)));
        }
    }
}
