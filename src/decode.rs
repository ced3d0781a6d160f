//! CPU based decoding.

mod block;

pub use self::block::{decode_block, decode_block_bc7};
use crate::{blocks_byte_size, Block, Error, Result};

/// Decompresses BC7 blocks into RGBA8 data.
///
/// `width` and `height` don't need to be multiples of 4; pixels of edge blocks outside the
/// texture are dropped. The output is tightly packed with `width * 4` bytes per row.
///
/// # Errors
/// * [`Error::InputTooShort`] if `blocks` holds fewer bytes than [`blocks_byte_size()`]
/// * [`Error::OutputBufferTooSmall`] if `rgba_data` holds fewer than `width * height * 4` bytes
///
/// # Example
/// ```
/// use bc7_compression::{blocks_byte_size, decode::decompress_blocks};
///
/// let blocks = vec![0u8; blocks_byte_size(6, 6)];
/// let mut rgba_data = vec![0xFF; 6 * 6 * 4];
///
/// decompress_blocks(6, 6, &blocks, &mut rgba_data).unwrap();
/// assert!(rgba_data.iter().all(|&value| value == 0));
/// ```
pub fn decompress_blocks(width: u32, height: u32, blocks: &[u8], rgba_data: &mut [u8]) -> Result<()> {
    let expected_input_size = blocks_byte_size(width, height);
    if blocks.len() < expected_input_size {
        return Err(Error::InputTooShort {
            required: expected_input_size,
            actual: blocks.len(),
        });
    }

    let width = width as usize;
    let height = height as usize;
    let expected_output_size = width * height * 4;
    if rgba_data.len() < expected_output_size {
        return Err(Error::OutputBufferTooSmall {
            required: expected_output_size,
            actual: rgba_data.len(),
        });
    }

    let blocks: &[Block] = bytemuck::cast_slice(&blocks[..expected_input_size]);
    let blocks_x = width.div_ceil(4);
    let row_pitch = width * 4;

    for (block_index, block) in blocks.iter().enumerate() {
        let bx = block_index % blocks_x;
        let by = block_index / blocks_x;
        let pixels = decode_block(block);

        for y in 0..4 {
            let pixel_y = by * 4 + y;
            if pixel_y >= height {
                break;
            }

            let columns = usize::min(4, width - bx * 4);
            let offset = pixel_y * row_pitch + bx * 16;
            let row = &pixels[y * 4..y * 4 + columns];
            rgba_data[offset..offset + columns * 4].copy_from_slice(bytemuck::cast_slice(row));
        }
    }

    log::debug!("Decoded {} BC7 blocks for a {width}x{height} texture", blocks.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_errors() {
        let mut rgba_data = vec![0; 8 * 8 * 4];
        assert_eq!(
            decompress_blocks(8, 8, &[0; 48], &mut rgba_data),
            Err(Error::InputTooShort {
                required: 64,
                actual: 48
            })
        );
        assert_eq!(
            decompress_blocks(8, 8, &[0; 64], &mut rgba_data[..100]),
            Err(Error::OutputBufferTooSmall {
                required: 256,
                actual: 100
            })
        );
    }

    #[test]
    fn edge_blocks_are_clipped() {
        // Mode 6, all endpoints saturated, every pixel opaque white
        let mut white = [0u8; 16];
        white[0] = 0xC0;
        white[1..8].fill(0xFF);
        white[8] = 0x01;

        let pixels = decode_block(&white);
        assert!(pixels.iter().all(|pixel| *pixel == [255; 4]));

        let blocks: Vec<u8> = white.iter().copied().cycle().take(16 * 4).collect();
        let mut rgba_data = vec![0; 5 * 6 * 4];
        decompress_blocks(5, 6, &blocks, &mut rgba_data).unwrap();

        assert!(rgba_data.iter().all(|&value| value == 255));
    }
}
