//! Address field extraction.
//!
//! Splits a byte address into the fields that locate it in the cache. Reading
//! the address most significant bit first, the layout is:
//!
//! ```text
//!  31                                        0
//! | tag | index | block | byte offset (2 bits) |
//! ```
//!
//! Zero-width fields (a single set, or single-word blocks) always decode to 0.

use serde::Serialize;

use crate::common::addr::Addr;
use crate::config::Geometry;

/// The tag, index and block fields of one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressFields {
    /// High-order word bits above the index.
    pub tag: u32,
    /// Set selected by the address.
    pub index: usize,
    /// Word offset within the block.
    pub block: usize,
}

/// Extracts `width` bits of `value` starting at bit `shift`.
///
/// Widths and shifts of 32 or more are handled without overflow.
#[inline]
fn bits(value: u32, shift: u32, width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    let shifted = value.checked_shr(shift).unwrap_or(0);
    match 1u32.checked_shl(width) {
        Some(limit) => shifted & (limit - 1),
        None => shifted,
    }
}

/// Decodes the index, block and tag fields of `addr` under `geometry`.
pub fn decode_fields(addr: Addr, geometry: &Geometry) -> AddressFields {
    let word = addr.word();
    let block = bits(word, 0, geometry.block_bits);
    let index = bits(word, geometry.block_bits, geometry.index_bits);
    let tag = bits(
        word,
        geometry.block_bits + geometry.index_bits,
        geometry.tag_bits,
    );
    AddressFields {
        tag,
        index: index as usize,
        block: block as usize,
    }
}
