//! Quantization and endpoint interpolation shared by the decoder and the encoder.

pub const WEIGHTS2: [u8; 4] = [0, 21, 43, 64];
pub const WEIGHTS3: [u8; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
pub const WEIGHTS4: [u8; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

/// Interpolation weights for an index of `prec` bits.
#[inline]
pub fn weights(prec: u8) -> &'static [u8] {
    match prec {
        2 => &WEIGHTS2,
        3 => &WEIGHTS3,
        _ => &WEIGHTS4,
    }
}

#[inline]
pub fn interpolate(a: u8, b: u8, prec: u8, index: usize) -> u8 {
    let w = u32::from(weights(prec)[index]);
    ((u32::from(a) * (64 - w) + u32::from(b) * w + 32) >> 6) as u8
}

/// Reduces an 8-bit value to `prec` bits, rounding to nearest.
#[inline]
pub fn quantize(value: u8, prec: u8) -> u8 {
    debug_assert!(prec > 0 && prec <= 8);
    if prec >= 8 {
        return value;
    }
    let rounded = u16::min(255, u16::from(value) + (1 << (7 - prec)));
    (rounded >> (8 - prec)) as u8
}

/// Expands a `prec` bit value to 8 bits by replicating its top bits into the low bits.
#[inline]
pub fn unquantize(value: u8, prec: u8) -> u8 {
    debug_assert!(prec > 0 && prec <= 8);
    if prec >= 8 {
        return value;
    }
    let shifted = value << (8 - prec);
    shifted | (shifted >> prec)
}

/// Quantizes every channel of an endpoint. Channels without precision become 255.
#[inline]
pub fn quantize_color(color: [u8; 4], prec: [u8; 4]) -> [u8; 4] {
    std::array::from_fn(|ch| {
        if prec[ch] == 0 {
            255
        } else {
            quantize(color[ch], prec[ch])
        }
    })
}

/// Unquantizes every channel of an endpoint. Channels without precision become 255.
#[inline]
pub fn unquantize_color(color: [u8; 4], prec: [u8; 4]) -> [u8; 4] {
    std::array::from_fn(|ch| {
        if prec[ch] == 0 {
            255
        } else {
            unquantize(color[ch], prec[ch])
        }
    })
}

/// Interpolates RGB with the color index and alpha with the alpha index.
#[inline]
pub fn interpolate_color(
    a: [u8; 4],
    b: [u8; 4],
    color_index: usize,
    alpha_index: usize,
    color_prec: u8,
    alpha_prec: u8,
) -> [u8; 4] {
    [
        interpolate(a[0], b[0], color_prec, color_index),
        interpolate(a[1], b[1], color_prec, color_index),
        interpolate(a[2], b[2], color_prec, color_index),
        interpolate(a[3], b[3], alpha_prec, alpha_index),
    ]
}
