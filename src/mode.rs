//! Descriptors of the eight BC7 modes.

use crate::Block;

/// Layout of one BC7 mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    /// Number of partitions minus one (0, 1 or 2).
    pub partitions: u8,
    /// Bits of the shape id.
    pub partition_bits: u8,
    /// Number of parity bits stored after the endpoints.
    pub p_bits: u8,
    /// Bits of the channel rotation field.
    pub rotation_bits: u8,
    /// Bits of the index mode field that swaps the two index planes.
    pub index_mode_bits: u8,
    /// Precision of the primary index plane.
    pub index_prec: u8,
    /// Precision of the secondary index plane, 0 if the mode has none.
    pub index_prec2: u8,
    /// Stored RGBA precision of every endpoint channel.
    pub color_prec: [u8; 4],
    /// RGBA precision after the parity bit is appended.
    pub color_prec_with_p: [u8; 4],
}

impl ModeInfo {
    #[inline]
    pub const fn region_count(&self) -> usize {
        self.partitions as usize + 1
    }

    #[inline]
    pub const fn endpoint_count(&self) -> usize {
        self.region_count() * 2
    }

    #[inline]
    pub const fn shape_count(&self) -> usize {
        1 << self.partition_bits
    }

    /// Returns true if `channel` gets a parity bit appended.
    #[inline]
    pub const fn has_p_bit(&self, channel: usize) -> bool {
        self.color_prec[channel] != self.color_prec_with_p[channel]
    }

    /// Returns true if the mode stores alpha in its endpoints.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.color_prec[3] != 0
    }

    /// Index precision for the color and alpha planes for the given index mode.
    #[inline]
    pub const fn index_precisions(&self, index_mode: usize) -> (u8, u8) {
        if index_mode == 0 {
            (self.index_prec, self.index_prec2)
        } else {
            (self.index_prec2, self.index_prec)
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn mode(
    partitions: u8,
    partition_bits: u8,
    p_bits: u8,
    rotation_bits: u8,
    index_mode_bits: u8,
    index_prec: u8,
    index_prec2: u8,
    color_prec: [u8; 4],
    color_prec_with_p: [u8; 4],
) -> ModeInfo {
    ModeInfo {
        partitions,
        partition_bits,
        p_bits,
        rotation_bits,
        index_mode_bits,
        index_prec,
        index_prec2,
        color_prec,
        color_prec_with_p,
    }
}

#[rustfmt::skip]
pub static MODES: [ModeInfo; 8] = [
    // 3 subsets, RGBP 4441 with unique P-bits, 3-bit indices, 16 shapes
    mode(2, 4, 6, 0, 0, 3, 0, [4, 4, 4, 0], [5, 5, 5, 0]),
    // 2 subsets, RGBP 6661 with shared P-bits, 3-bit indices
    mode(1, 6, 2, 0, 0, 3, 0, [6, 6, 6, 0], [7, 7, 7, 0]),
    // 3 subsets, RGB 555, 2-bit indices
    mode(2, 6, 0, 0, 0, 2, 0, [5, 5, 5, 0], [5, 5, 5, 0]),
    // 2 subsets, RGBP 7771 with unique P-bits, 2-bit indices
    mode(1, 6, 4, 0, 0, 2, 0, [7, 7, 7, 0], [8, 8, 8, 0]),
    // 1 subset, RGB 555 A6, 2-bit and 3-bit index planes, rotation, index selector
    mode(0, 0, 0, 2, 1, 2, 3, [5, 5, 5, 6], [5, 5, 5, 6]),
    // 1 subset, RGB 777 A8, 2-bit index planes, rotation
    mode(0, 0, 0, 2, 0, 2, 2, [7, 7, 7, 8], [7, 7, 7, 8]),
    // 1 subset, RGBAP 77771 with unique P-bits, 4-bit indices
    mode(0, 0, 2, 0, 0, 4, 0, [7, 7, 7, 7], [8, 8, 8, 8]),
    // 2 subsets, RGBAP 55551 with unique P-bits, 2-bit indices
    mode(1, 6, 4, 0, 0, 2, 0, [5, 5, 5, 5], [6, 6, 6, 6]),
];

/// Returns the mode of an encoded block, or `None` for the reserved mode tag.
///
/// The mode is the number of zero bits before the first one bit.
#[inline]
pub fn block_mode(block: &Block) -> Option<usize> {
    let mode = block[0].trailing_zeros() as usize;
    (mode < MODES.len()).then_some(mode)
}
