use bc7_compression::{
    block_mode, decode::decompress_blocks, decode_block, encode_block, BC7Settings, BitCursor,
    Block, MODES,
};

use crate::common::{metrics::block_squared_error, Noise};

mod common;

fn noise_pixels(seed: u32, opaque: bool) -> [[u8; 4]; 16] {
    let mut noise = Noise::new(seed);
    std::array::from_fn(|_| {
        let value = noise.next_u32();
        [
            value as u8,
            (value >> 8) as u8,
            (value >> 16) as u8,
            if opaque { 255 } else { (value >> 24) as u8 },
        ]
    })
}

/// Reads the mode, shape, rotation and index mode fields of a block.
fn header(block: &Block) -> (usize, usize, u32, u32) {
    let mode = block_mode(block).expect("reserved mode");
    let info = &MODES[mode];

    let mut cursor = BitCursor::from_block(block);
    cursor.read_bits(mode as u32 + 1);
    let shape = cursor.read_bits(u32::from(info.partition_bits)) as usize;
    let rotation = cursor.read_bits(u32::from(info.rotation_bits));
    let index_mode = cursor.read_bits(u32::from(info.index_mode_bits));
    (mode, shape, rotation, index_mode)
}

#[test]
fn solid_color_round_trips_exactly() {
    let pixels = [[200, 100, 50, 255]; 16];

    for settings in [
        BC7Settings::quick(),
        BC7Settings::basic(),
        BC7Settings::slow(),
        BC7Settings::very_slow(),
    ] {
        let block = encode_block(&pixels, None, &settings);
        assert_eq!(decode_block(&block), pixels, "{settings:?}");
    }
}

#[test]
fn solid_color_round_trips_exactly_in_mode_6() {
    for pixels in [[[200, 100, 50, 255]; 16], [[201, 101, 51, 255]; 16]] {
        let block = encode_block(&pixels, None, &BC7Settings::quick());

        assert_eq!(block_mode(&block), Some(6));
        assert_eq!(decode_block(&block), pixels);
    }
}

#[test]
fn every_solid_gray_stays_within_one_step() {
    for value in (0..=255u8).step_by(15) {
        let pixels = [[value, value, value, 255]; 16];
        let decoded = decode_block(&encode_block(&pixels, None, &BC7Settings::basic()));

        for (pixel, expected) in decoded.iter().zip(pixels.iter()) {
            for ch in 0..4 {
                assert!(pixel[ch].abs_diff(expected[ch]) <= 1, "{value}: {pixel:?}");
            }
        }
    }
}

#[test]
fn three_color_block_has_a_small_error() {
    let mut pixels = [[220, 40, 40, 255]; 16];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        match i % 4 {
            0 | 1 => {}
            2 => *pixel = [40, 200, 60, 255],
            _ => *pixel = [30, 60, 210, 255],
        }
    }

    let decoded = decode_block(&encode_block(&pixels, None, &BC7Settings::slow()));
    let mse = block_squared_error(&pixels, &decoded) as f32 / 64.0;
    assert!(mse < 16.0, "mse {mse}");
}

#[test]
fn decode_is_deterministic() {
    for seed in 0..8 {
        let pixels = noise_pixels(seed, false);
        let block = encode_block(&pixels, None, &BC7Settings::basic());
        assert_eq!(decode_block(&block), decode_block(&block));
    }

    let raw: Block = std::array::from_fn(|i| (i as u8).wrapping_mul(37));
    assert_eq!(decode_block(&raw), decode_block(&raw));
}

#[test]
fn reserved_mode_decodes_to_transparent_black() {
    let mut block = [0xA5; 16];
    block[0] = 0;
    assert_eq!(block_mode(&block), None);
    assert_eq!(decode_block(&block), [[0; 4]; 16]);

    let mut rgba_data = vec![0xFF; 4 * 4 * 4];
    decompress_blocks(4, 4, &block, &mut rgba_data).unwrap();
    assert!(rgba_data.iter().all(|&value| value == 0));
}

#[test]
fn every_mode_tag_is_recognised() {
    for mode in 0..8 {
        let mut block = [0u8; 16];
        block[0] = 1 << mode;
        assert_eq!(block_mode(&block), Some(mode));
    }
}

#[test]
fn opaque_blocks_keep_full_alpha() {
    for seed in 0..6 {
        let pixels = noise_pixels(seed, true);
        for settings in [BC7Settings::quick(), BC7Settings::basic(), BC7Settings::slow()] {
            let block = encode_block(&pixels, None, &settings);
            let (mode, _, rotation, _) = header(&block);

            assert_ne!(mode, 7, "seed {seed}");
            assert_eq!(rotation, 0, "seed {seed}");
            assert!(decode_block(&block).iter().all(|pixel| pixel[3] == 255));
        }
    }
}

#[test]
fn translucent_blocks_use_modes_with_alpha() {
    let pixels: [[u8; 4]; 16] = std::array::from_fn(|i| [120, 80, 40, (i * 16) as u8]);
    let block = encode_block(&pixels, None, &BC7Settings::basic());
    let (mode, _, _, _) = header(&block);

    assert!(MODES[mode].has_alpha(), "mode {mode}");
    let alpha_err: u32 = decode_block(&block)
        .iter()
        .zip(pixels.iter())
        .map(|(pixel, expected)| u32::from(pixel[3].abs_diff(expected[3])).pow(2))
        .sum();
    assert!(alpha_err <= 64, "alpha error {alpha_err}");
}

#[test]
fn validation_does_not_change_the_output() {
    let settings = BC7Settings::basic();
    for seed in 0..4 {
        let pixels = noise_pixels(seed, seed % 2 == 0);
        assert_eq!(
            encode_block(&pixels, None, &settings),
            encode_block(&pixels, None, &settings.with_validation(true))
        );
    }
}
