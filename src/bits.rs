//! Bit level access to a single 128-bit block.

use crate::Block;

const BLOCK_BITS: u32 = 128;

/// Cursor over the 128 bits of one block.
///
/// Fields are stored least-significant-bit first, starting at bit 0 of byte 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    bits: u128,
    position: u32,
}

impl BitCursor {
    /// Creates an all zero block with the cursor at bit 0.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: 0,
            position: 0,
        }
    }

    /// Creates a cursor over an existing block with the cursor at bit 0.
    #[inline]
    pub fn from_block(block: &Block) -> Self {
        Self {
            bits: u128::from_le_bytes(*block),
            position: 0,
        }
    }

    /// Returns the block bytes.
    #[inline]
    pub fn to_block(&self) -> Block {
        self.bits.to_le_bytes()
    }

    /// Current bit offset of the cursor.
    #[inline]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Number of bits between the cursor and the end of the block.
    #[inline]
    pub const fn remaining(&self) -> u32 {
        BLOCK_BITS - self.position
    }

    /// Returns true if `count` more bits can be read without crossing bit 128.
    #[inline]
    pub const fn can_read(&self, count: u32) -> bool {
        count <= self.remaining()
    }

    #[inline]
    pub fn read_bit(&mut self) -> u32 {
        self.read_bits(1)
    }

    /// Reads `count` bits (at most 32) and advances the cursor.
    #[inline]
    pub fn read_bits(&mut self, count: u32) -> u32 {
        debug_assert!(count <= 32);
        debug_assert!(self.can_read(count), "read past the end of the block");

        if count == 0 {
            return 0;
        }

        let mask = (1u128 << count) - 1;
        let value = ((self.bits >> self.position) & mask) as u32;
        self.position += count;
        value
    }

    /// Writes the low `count` bits of `value` at `offset` without moving the cursor.
    #[inline]
    pub fn set_bits(&mut self, offset: u32, count: u32, value: u32) {
        debug_assert!(count <= 32);
        debug_assert!(offset + count <= BLOCK_BITS, "write past the end of the block");

        if count == 0 {
            return;
        }

        let mask = ((1u128 << count) - 1) << offset;
        self.bits = (self.bits & !mask) | ((u128::from(value) << offset) & mask);
    }

    /// Writes the low `count` bits of `value` at the cursor and advances it.
    #[inline]
    pub fn write_bits(&mut self, count: u32, value: u32) {
        self.set_bits(self.position, count, value);
        self.position += count;
    }
}
