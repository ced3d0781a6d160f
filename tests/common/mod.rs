#![allow(dead_code)]

use bc7_compression::{
    blocks_byte_size, decode::decompress_blocks, encode::compress_rgba8, BC7Settings,
};
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

pub mod metrics;

pub const TEXTURE_SIZE: u32 = 16;

/// Small xorshift generator so every run sees the same noise.
pub struct Noise(u32);

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9) | 1)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    /// Value in `-amplitude..=amplitude`.
    pub fn offset(&mut self, amplitude: i32) -> i32 {
        (self.next_u32() % (2 * amplitude as u32 + 1)) as i32 - amplitude
    }
}

fn ramp(value: u32, size: u32) -> u8 {
    (value * 255 / (size - 1).max(1)) as u8
}

/// Opaque diagonal ramp. The colors of every block lie on a line.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let t = ramp(x + y, width + height - 1);
        Rgba([t, 255 - t, 96, 255])
    })
}

/// Diagonal ramp with alpha fading in along it.
pub fn alpha_gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let t = ramp(x + y, width + height - 1);
        Rgba([t, 64, 255 - t, t])
    })
}

/// Opaque gradient with per pixel noise.
pub fn noisy_image(width: u32, height: u32, seed: u32) -> RgbaImage {
    let mut noise = Noise::new(seed);
    let mut image = gradient_image(width, height);
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (i32::from(*channel) + noise.offset(16)).clamp(0, 255) as u8;
        }
    }
    image
}

/// Flat colored rectangles with hard edges, three or more colors per block in places.
pub fn patches_image(width: u32, height: u32) -> RgbaImage {
    const COLORS: [[u8; 4]; 5] = [
        [230, 30, 40, 255],
        [20, 200, 60, 255],
        [40, 50, 220, 255],
        [250, 240, 20, 160],
        [10, 10, 10, 255],
    ];

    RgbaImage::from_fn(width, height, |x, y| {
        let index = (x / 3 + (y / 2) * 2) as usize % COLORS.len();
        Rgba(COLORS[index])
    })
}

pub fn encode_image(image: &RgbaImage, settings: &BC7Settings) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let mut blocks = vec![0; blocks_byte_size(width, height)];
    compress_rgba8(image.as_raw(), &mut blocks, width, height, width * 4, settings)
        .expect("can't encode image");
    blocks
}

pub fn decode_image(blocks: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut rgba_data = vec![0; (width * height * 4) as usize];
    decompress_blocks(width, height, blocks, &mut rgba_data).expect("can't decode blocks");
    rgba_data
}

/// Writes the image next to the test binaries if `BC7_SAVE_IMAGES` is set.
pub fn save_png(name: &str, data: &[u8], width: u32, height: u32) {
    if std::env::var_os("BC7_SAVE_IMAGES").is_none() {
        return;
    }

    let path = std::env::temp_dir().join(format!("{name}.png"));
    let file = std::fs::File::create(&path).unwrap();
    let encoder = PngEncoder::new(file);
    encoder
        .write_image(data, width, height, ExtendedColorType::Rgba8)
        .unwrap();
    println!("Saved {}", path.display());
}
