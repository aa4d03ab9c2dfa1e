//! Address Type Tests.
//!
//! Verifies word extraction, offset-insensitive comparison, block alignment
//! and binary rendering of `Addr`.

use lwcache_core::Addr;
use lwcache_core::common::constants::{WORD_ADDRESS_BITS, WORD_BYTES};

#[test]
fn word_drops_byte_offset() {
    assert_eq!(Addr(0x0000_0013).word(), 0x4);
    assert_eq!(Addr(0x0000_0013).byte_offset(), 3);
    assert_eq!(Addr(u32::MAX).word(), (1 << WORD_ADDRESS_BITS) - 1);
}

#[test]
fn same_word_ignores_byte_offset_only() {
    assert!(Addr(0x0000_0010).same_word(Addr(0x0000_0013)));
    assert!(!Addr(0x0000_0010).same_word(Addr(0x0000_0014)));
    assert!(!Addr(0x8000_0000).same_word(Addr(0x0000_0000)));
}

#[test]
fn block_base_rounds_down_to_block() {
    // 4-word blocks: 16-byte alignment.
    assert_eq!(Addr(0x0000_002F).block_base(2), Addr(0x0000_0020));
    // Single-word blocks: word alignment only.
    assert_eq!(Addr(0x0000_002F).block_base(0), Addr(0x0000_002C));
}

#[test]
fn add_words_steps_by_word_size() {
    assert_eq!(Addr(0x100).add_words(3), Addr(0x100 + 3 * WORD_BYTES));
}

#[test]
fn binary_string_is_32_digits_msb_first() {
    let s = Addr(0x8000_0001).to_binary_string();
    assert_eq!(s.len(), 32);
    assert!(s.starts_with('1'));
    assert!(s.ends_with('1'));
    assert_eq!(s.matches('1').count(), 2);
}

#[test]
fn display_is_eight_hex_digits() {
    assert_eq!(Addr(0x1c).to_string(), "0000001c");
    assert_eq!(Addr(0xDEAD_BEEF).to_string(), "deadbeef");
}
