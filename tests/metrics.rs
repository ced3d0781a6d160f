use bc7_compression::{decode_block, encode_block, BC7Settings};
use image::RgbaImage;

use crate::common::{
    alpha_gradient_image, decode_image, encode_image, gradient_image,
    metrics::{block_squared_error, calculate_image_metrics, PsnrResult},
    noisy_image, patches_image, save_png, TEXTURE_SIZE,
};

mod common;

fn print_metrics(name: &str, metrics: &PsnrResult) {
    println!("-----------------------");
    println!("Image name: {}", name);
    println!("Overall PSNR: {:.2} dB", metrics.overall_psnr);
    println!("Overall MSE: {:.6}", metrics.overall_mse);
    println!(
        "Red channel PSNR: {:.2} dB",
        metrics.channel_results.red.psnr
    );
    println!(
        "Green channel PSNR: {:.2} dB",
        metrics.channel_results.green.psnr
    );
    println!(
        "Blue channel PSNR: {:.2} dB",
        metrics.channel_results.blue.psnr
    );
    println!(
        "Alpha channel PSNR: {:.2} dB",
        metrics.channel_results.alpha.psnr
    );
    println!("-----------------------");
}

fn calculate_psnr_for_image(
    name: &str,
    image: &RgbaImage,
    channels: u32,
    settings: &BC7Settings,
) -> PsnrResult {
    let (width, height) = image.dimensions();
    let blocks = encode_image(image, settings);
    let decompressed_data = decode_image(&blocks, width, height);

    save_png(name, &decompressed_data, width, height);

    let metrics =
        calculate_image_metrics(image.as_raw(), &decompressed_data, width, height, channels);
    print_metrics(name, &metrics);
    metrics
}

/// Splits an image into its 4x4 pixel blocks.
fn image_blocks(image: &RgbaImage) -> Vec<[[u8; 4]; 16]> {
    let (width, height) = image.dimensions();
    let mut blocks = Vec::new();
    for by in (0..height).step_by(4) {
        for bx in (0..width).step_by(4) {
            blocks.push(std::array::from_fn(|i| {
                image.get_pixel(bx + i as u32 % 4, by + i as u32 / 4).0
            }));
        }
    }
    blocks
}

#[test]
fn psnr_gradient() {
    let image = gradient_image(TEXTURE_SIZE, TEXTURE_SIZE);

    let metrics = calculate_psnr_for_image("gradient", &image, 3, &BC7Settings::basic());
    assert!(metrics.overall_psnr > 35.0, "{metrics:?}");
    assert!(metrics.channel_results.alpha.psnr.is_infinite());

    let metrics = calculate_psnr_for_image("gradient_quick", &image, 3, &BC7Settings::quick());
    assert!(metrics.overall_psnr > 30.0, "{metrics:?}");
}

#[test]
fn psnr_alpha_gradient() {
    let image = alpha_gradient_image(TEXTURE_SIZE, TEXTURE_SIZE);
    let metrics = calculate_psnr_for_image("alpha_gradient", &image, 4, &BC7Settings::basic());

    assert!(metrics.overall_psnr > 35.0, "{metrics:?}");
    assert!(metrics.channel_results.alpha.psnr > 35.0, "{metrics:?}");
}

#[test]
fn psnr_noise() {
    let image = noisy_image(TEXTURE_SIZE, TEXTURE_SIZE, 3);
    let metrics = calculate_psnr_for_image("noise", &image, 3, &BC7Settings::basic());

    assert!(metrics.overall_psnr > 25.0, "{metrics:?}");
    assert!(metrics.channel_results.alpha.psnr.is_infinite());
}

#[test]
fn wider_searches_never_lose_quality() {
    let images = [
        patches_image(8, 8),
        noisy_image(8, 8, 11),
        alpha_gradient_image(8, 8),
    ];

    for image in &images {
        for pixels in image_blocks(image) {
            let basic = decode_block(&encode_block(&pixels, None, &BC7Settings::basic()));
            let slow = decode_block(&encode_block(&pixels, None, &BC7Settings::slow()));
            let very_slow = decode_block(&encode_block(&pixels, None, &BC7Settings::very_slow()));

            let basic_err = block_squared_error(&pixels, &basic);
            let slow_err = block_squared_error(&pixels, &slow);
            let very_slow_err = block_squared_error(&pixels, &very_slow);

            assert!(slow_err <= basic_err, "{pixels:?}");
            assert!(very_slow_err <= slow_err, "{pixels:?}");
        }
    }
}
