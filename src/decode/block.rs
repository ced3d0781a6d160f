//! Decoder for single BC7 blocks.

use thiserror::Error;

use crate::{
    bits::BitCursor,
    interpolate::{interpolate_color, unquantize_color},
    mode::MODES,
    partition::{is_anchor, region},
    Block, BLOCK_BYTE_SIZE,
};

/// Reason a block can't be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum Malformed {
    #[error("reserved mode tag")]
    ReservedMode,
    #[error("{0} field crosses the end of the block")]
    Truncated(&'static str),
}

/// Pixels of a block that can't be decoded.
const ERROR_PIXELS: [[u8; 4]; 16] = [[0; 4]; 16];

#[inline]
fn read_field(cursor: &mut BitCursor, count: u8, field: &'static str) -> Result<u32, Malformed> {
    let count = u32::from(count);
    if !cursor.can_read(count) {
        return Err(Malformed::Truncated(field));
    }
    Ok(cursor.read_bits(count))
}

/// Decodes a BC7 block into 16 RGBA8 pixels in row-major order.
///
/// Blocks with the reserved mode tag decode to transparent black.
pub fn decode_block(block: &Block) -> [[u8; 4]; 16] {
    match decode_pixels(block) {
        Ok(pixels) => pixels,
        Err(reason) => {
            log::debug!("Malformed BC7 block {block:02X?}: {reason}");
            ERROR_PIXELS
        }
    }
}

/// Decodes a BC7 block by reading 16 bytes from `compressed_block` and writing the RGBA8 data into `decompressed_block` with `destination_pitch` many bytes per output row.
///
/// # Panics
/// If `compressed_block` is shorter than 16 bytes or `decompressed_block` can't hold 4 rows.
pub fn decode_block_bc7(
    compressed_block: &[u8],
    decompressed_block: &mut [u8],
    destination_pitch: usize,
) {
    let mut block = [0; BLOCK_BYTE_SIZE];
    block.copy_from_slice(&compressed_block[..BLOCK_BYTE_SIZE]);

    let pixels = decode_block(&block);
    for (row, row_pixels) in pixels.chunks_exact(4).enumerate() {
        let offset = row * destination_pitch;
        decompressed_block[offset..offset + 16].copy_from_slice(bytemuck::cast_slice(row_pixels));
    }
}

fn decode_pixels(block: &Block) -> Result<[[u8; 4]; 16], Malformed> {
    let mut cursor = BitCursor::from_block(block);

    // Find mode
    let mut mode = 0;
    while mode < MODES.len() && cursor.read_bit() == 0 {
        mode += 1;
    }
    if mode >= MODES.len() {
        return Err(Malformed::ReservedMode);
    }

    let info = &MODES[mode];
    let shape = read_field(&mut cursor, info.partition_bits, "shape")? as usize;
    let rotation = read_field(&mut cursor, info.rotation_bits, "rotation")?;
    let index_mode = read_field(&mut cursor, info.index_mode_bits, "index mode")? as usize;

    // Endpoints are stored channel by channel
    let endpoint_count = info.endpoint_count();
    let mut endpoints = [[0u8; 4]; 6];
    for ch in 0..4 {
        if info.color_prec[ch] == 0 {
            continue;
        }
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            endpoint[ch] = read_field(&mut cursor, info.color_prec[ch], "endpoint")? as u8;
        }
    }

    if info.p_bits > 0 {
        let p_bit_count = info.p_bits as usize;
        let mut p_bits = [0u8; 6];
        for p_bit in p_bits.iter_mut().take(p_bit_count) {
            *p_bit = read_field(&mut cursor, 1, "parity bit")? as u8;
        }

        // Shared P-bits cover consecutive endpoints
        for (i, endpoint) in endpoints.iter_mut().take(endpoint_count).enumerate() {
            let p_bit = p_bits[i * p_bit_count / endpoint_count];
            for ch in 0..4 {
                if info.has_p_bit(ch) {
                    endpoint[ch] = (endpoint[ch] << 1) | p_bit;
                }
            }
        }
    }

    for endpoint in endpoints.iter_mut().take(endpoint_count) {
        *endpoint = unquantize_color(*endpoint, info.color_prec_with_p);
    }

    let mut primary = [0usize; 16];
    for (pixel, index) in primary.iter_mut().enumerate() {
        let bits = if is_anchor(info.partitions, shape, pixel) {
            info.index_prec - 1
        } else {
            info.index_prec
        };
        *index = read_field(&mut cursor, bits, "index")? as usize;
    }

    let mut secondary = primary;
    if info.index_prec2 > 0 {
        for (pixel, index) in secondary.iter_mut().enumerate() {
            let bits = if pixel == 0 {
                info.index_prec2 - 1
            } else {
                info.index_prec2
            };
            *index = read_field(&mut cursor, bits, "secondary index")? as usize;
        }
    }

    let (color_prec, alpha_prec) = match info.index_prec2 {
        0 => (info.index_prec, info.index_prec),
        _ => info.index_precisions(index_mode),
    };
    let (color_indices, alpha_indices) = match index_mode {
        0 => (&primary, &secondary),
        _ => (&secondary, &primary),
    };

    Ok(std::array::from_fn(|pixel| {
        let region = region(info.partitions, shape, pixel);
        let mut color = interpolate_color(
            endpoints[region * 2],
            endpoints[region * 2 + 1],
            color_indices[pixel],
            alpha_indices[pixel],
            color_prec,
            alpha_prec,
        );

        match rotation {
            1 => color.swap(0, 3),
            2 => color.swap(1, 3),
            3 => color.swap(2, 3),
            _ => {}
        }

        color
    }))
}
