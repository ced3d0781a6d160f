//! Errors of the texture level functions.

use thiserror::Error;

/// Errors returned when encoding or decoding whole textures.
///
/// Single blocks never fail: malformed blocks decode to transparent black.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The encoder needs dimensions that are multiples of 4.
    #[error("Texture dimensions {width}x{height} are not multiples of 4")]
    InvalidDimensions { width: u32, height: u32 },

    /// The row stride can't hold a full row of pixels.
    #[error("Row stride of {stride} bytes is too small for a width of {width} pixels")]
    InvalidStride { stride: u32, width: u32 },

    /// Input buffer is too short for the given dimensions.
    #[error("Input buffer too short: required at least {required} bytes, got {actual} bytes")]
    InputTooShort { required: usize, actual: usize },

    /// Output buffer is too small for the given dimensions.
    #[error("Output buffer too small: required {required} bytes, got {actual} bytes")]
    OutputBufferTooSmall { required: usize, actual: usize },
}

/// Result type of the texture level functions.
pub type Result<T> = std::result::Result<T, Error>;
