//! Address-width constants.
//!
//! The simulated machine issues 32-bit byte addresses for word loads. The two
//! low bits select a byte inside a 4-byte word and never participate in set
//! or block selection; everything the cache looks at lives in the upper 30.

/// Width of a byte address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Number of low-order bits selecting a byte within a word.
pub const BYTE_OFFSET_BITS: u32 = 2;

/// Number of bits identifying a word (address bits minus byte offset).
pub const WORD_ADDRESS_BITS: u32 = ADDRESS_BITS - BYTE_OFFSET_BITS;

/// Size of one word in bytes.
pub const WORD_BYTES: u32 = 1 << BYTE_OFFSET_BITS;

/// Mask selecting the byte-offset bits.
pub const BYTE_OFFSET_MASK: u32 = WORD_BYTES - 1;
