//! # bc7_compression
//!
//! CPU encoder and decoder for BC7 texture blocks.
//!
//! A BC7 block stores a 4x4 tile of RGBA8 pixels in 128 bits. The decoder is bit exact with the
//! published format, so blocks written here can be sampled by any GPU and blocks written by
//! other tools decode here. The encoder searches the eight block modes, their shapes, rotations
//! and index modes for the representation with the lowest squared error.
//!
//! ## Block level API
//!
//! ```
//! use bc7_compression::{decode_block, encode_block, BC7Settings};
//!
//! let pixels = [[200, 100, 50, 255]; 16];
//! let block = encode_block(&pixels, None, &BC7Settings::basic());
//! assert_eq!(decode_block(&block), pixels);
//! ```
//!
//! ## Texture level API
//!
//! [`encode::compress_rgba8`] and [`decode::decompress_blocks`] work on whole RGBA8 textures.
//! With the `rayon` feature, [`encode::compress_rgba8_parallel`] spreads the blocks over the
//! rayon thread pool.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bits;
pub mod decode;
pub mod encode;
mod error;
mod interpolate;
mod mode;
mod partition;
mod settings;

pub use bits::BitCursor;
pub use decode::decode_block;
pub use encode::encode_block;
pub use error::{Error, Result};
pub use mode::{block_mode, ModeInfo, MODES};
pub use settings::BC7Settings;

/// One encoded BC7 block.
pub type Block = [u8; 16];

/// Size of one encoded block in bytes.
pub const BLOCK_BYTE_SIZE: usize = 16;

/// Returns the bytes per row of blocks for the given width.
///
/// Width is rounded up to the nearest multiple of 4.
pub const fn bytes_per_row(width: u32) -> u32 {
    let blocks_per_row = (width + 3) / 4;
    blocks_per_row * BLOCK_BYTE_SIZE as u32
}

/// Returns the byte size required for storing compressed blocks for the given dimensions.
///
/// Width and height are rounded up to the nearest multiple of 4.
pub const fn blocks_byte_size(width: u32, height: u32) -> usize {
    let block_width = (width as usize + 3) / 4;
    let block_height = (height as usize + 3) / 4;
    block_width * block_height * BLOCK_BYTE_SIZE
}
