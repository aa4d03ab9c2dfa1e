//! Byte address type.
//!
//! This module defines a strong type for the 32-bit byte addresses carried by
//! word-load instructions. It provides:
//! 1. **Type Safety:** Keeps addresses apart from set indices and way numbers.
//! 2. **Bit Views:** Fixed-width binary rendering and word-bit extraction.
//! 3. **Alignment:** Rounding an address down to its word or block boundary.

use std::fmt;

use serde::{Serialize, Serializer};

use super::constants::{ADDRESS_BITS, BYTE_OFFSET_BITS, BYTE_OFFSET_MASK};

/// A 32-bit byte address issued by a word load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 32-bit address value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the word number: the address with the byte offset shifted out.
    #[inline(always)]
    pub const fn word(self) -> u32 {
        self.0 >> BYTE_OFFSET_BITS
    }

    /// Returns the byte offset within the addressed word (0-3).
    #[inline(always)]
    pub const fn byte_offset(self) -> u32 {
        self.0 & BYTE_OFFSET_MASK
    }

    /// Returns true if both addresses name the same word.
    ///
    /// Only the top 30 bits are compared, so two loads that differ in their
    /// byte offset are treated as the same access.
    #[inline(always)]
    pub const fn same_word(self, other: Self) -> bool {
        self.word() == other.word()
    }

    /// Rounds the address down to the first word of its block.
    ///
    /// Clears the byte offset and the `block_bits` word-offset bits above it.
    ///
    /// # Arguments
    ///
    /// * `block_bits` - log2 of the block size in words.
    pub const fn block_base(self, block_bits: u32) -> Self {
        let low = BYTE_OFFSET_BITS + block_bits;
        if low >= ADDRESS_BITS {
            return Self(0);
        }
        Self(self.0 & !((1u32 << low) - 1))
    }

    /// Returns the address `words` words above this one, wrapping at 2^32.
    #[inline(always)]
    pub const fn add_words(self, words: u32) -> Self {
        Self(self.0.wrapping_add(words << BYTE_OFFSET_BITS))
    }

    /// Renders the address as a 32-character binary string, most significant bit first.
    pub fn to_binary_string(self) -> String {
        format!("{:032b}", self.0)
    }
}

impl From<u32> for Addr {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Addr> for u32 {
    fn from(value: Addr) -> Self {
        value.0
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Serialize for Addr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
