//! CPU based encoding.

mod bc7;
mod common;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "rayon")]
use strength_reduce::StrengthReducedUsize;

use crate::{blocks_byte_size, encode::bc7::BlockCompressorBC7, BC7Settings, Block, Error, Result};

/// Encodes 16 RGBA8 pixels in row-major order into one BC7 block.
///
/// `float_pixels` optionally carries the same pixels in the 0.0..=1.0 range with more
/// precision. They guide the endpoint fits while the error is always measured against
/// `pixels`.
///
/// # Example
/// ```
/// use bc7_compression::{block_mode, decode_block, encode_block, BC7Settings};
///
/// let pixels = [[201, 101, 51, 255]; 16];
/// let block = encode_block(&pixels, None, &BC7Settings::quick());
///
/// assert_eq!(block_mode(&block), Some(6));
/// assert_eq!(decode_block(&block), pixels);
/// ```
pub fn encode_block(
    pixels: &[[u8; 4]; 16],
    float_pixels: Option<&[[f32; 4]; 16]>,
    settings: &BC7Settings,
) -> Block {
    let mut block_compressor = BlockCompressorBC7::new(settings);
    block_compressor.load_pixels(pixels, float_pixels);
    block_compressor.compress_block_bc7_core();
    block_compressor.encoded_block()
}

/// Validates the texture arguments and returns the number of block bytes written.
fn check_texture(
    rgba_data: &[u8],
    blocks_buffer: &[u8],
    width: u32,
    height: u32,
    stride: u32,
) -> Result<usize> {
    if width % 4 != 0 || height % 4 != 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    if (stride as usize) < width as usize * 4 {
        return Err(Error::InvalidStride { stride, width });
    }

    let required_input = match height {
        0 => 0,
        _ => (height as usize - 1) * stride as usize + width as usize * 4,
    };
    if rgba_data.len() < required_input {
        return Err(Error::InputTooShort {
            required: required_input,
            actual: rgba_data.len(),
        });
    }

    let required_output = blocks_byte_size(width, height);
    if blocks_buffer.len() < required_output {
        return Err(Error::OutputBufferTooSmall {
            required: required_output,
            actual: blocks_buffer.len(),
        });
    }

    Ok(required_output)
}

/// Compresses raw RGBA8 data into BC7 blocks.
///
/// # Data Layout Requirements
/// The input data must be in RGBA8 format (8 bits per channel, 32 bits per pixel) in row-major
/// order, with `stride` bytes per row. Blocks are written row by row, tightly packed.
///
/// # Arguments
/// * `rgba_data` - Source RGBA8 pixel data
/// * `blocks_buffer` - Destination buffer for the compressed blocks
/// * `width` - Width of the image in pixels, a multiple of 4
/// * `height` - Height of the image in pixels, a multiple of 4
/// * `stride` - Number of bytes per row in the source data. Must be at least `width * 4`.
/// * `settings` - Encoder settings
///
/// # Errors
/// * [`Error::InvalidDimensions`] if `width` or `height` is not a multiple of 4
/// * [`Error::InvalidStride`] if `stride` is smaller than `width * 4`
/// * [`Error::InputTooShort`] if `rgba_data` can't hold `height` rows
/// * [`Error::OutputBufferTooSmall`] if `blocks_buffer` is smaller than [`blocks_byte_size()`]
///
/// # Example
/// ```
/// use bc7_compression::{blocks_byte_size, encode::compress_rgba8, BC7Settings};
///
/// let rgba_data = vec![0u8; 16 * 16 * 4];
/// let width = 16;
/// let height = 16;
/// let stride = width * 4;
///
/// let mut blocks_buffer = vec![0u8; blocks_byte_size(width, height)];
///
/// compress_rgba8(
///     &rgba_data,
///     &mut blocks_buffer,
///     width,
///     height,
///     stride,
///     &BC7Settings::quick(),
/// )
/// .unwrap();
/// ```
pub fn compress_rgba8(
    rgba_data: &[u8],
    blocks_buffer: &mut [u8],
    width: u32,
    height: u32,
    stride: u32,
    settings: &BC7Settings,
) -> Result<()> {
    let required_size = check_texture(rgba_data, blocks_buffer, width, height, stride)?;

    let stride = stride as usize;
    let block_width = width as usize / 4;
    let blocks: &mut [Block] = bytemuck::cast_slice_mut(&mut blocks_buffer[..required_size]);

    for (index, block) in blocks.iter_mut().enumerate() {
        let xx = index % block_width;
        let yy = index / block_width;

        let mut block_compressor = BlockCompressorBC7::new(settings);
        block_compressor.load_block_interleaved_rgba(rgba_data, xx, yy, stride);
        block_compressor.compress_block_bc7_core();
        *block = block_compressor.encoded_block();
    }

    log::debug!("Encoded {} BC7 blocks for a {width}x{height} texture", blocks.len());

    Ok(())
}

/// Compresses raw RGBA8 data into BC7 blocks on the rayon thread pool.
///
/// Produces the same blocks as [`compress_rgba8`] and takes the same arguments.
///
/// # Errors
/// Same as [`compress_rgba8`].
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub fn compress_rgba8_parallel(
    rgba_data: &[u8],
    blocks_buffer: &mut [u8],
    width: u32,
    height: u32,
    stride: u32,
    settings: &BC7Settings,
) -> Result<()> {
    let required_size = check_texture(rgba_data, blocks_buffer, width, height, stride)?;
    if required_size == 0 {
        return Ok(());
    }

    let stride = stride as usize;
    let block_width = StrengthReducedUsize::new(width as usize / 4);
    let blocks: &mut [Block] = bytemuck::cast_slice_mut(&mut blocks_buffer[..required_size]);

    blocks.par_iter_mut().enumerate().for_each(|(index, block)| {
        let (yy, xx) = StrengthReducedUsize::div_rem(index, block_width);

        let mut block_compressor = BlockCompressorBC7::new(settings);
        block_compressor.load_block_interleaved_rgba(rgba_data, xx, yy, stride);
        block_compressor.compress_block_bc7_core();
        *block = block_compressor.encoded_block();
    });

    log::debug!(
        "Encoded {} BC7 blocks for a {width}x{height} texture on {} threads",
        blocks.len(),
        rayon::current_num_threads()
    );

    Ok(())
}
