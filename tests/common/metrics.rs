#[derive(Debug, Clone)]
pub struct PsnrResult {
    pub overall_psnr: f64,
    pub overall_mse: f64,
    pub channel_results: ChannelResults,
}

#[derive(Debug, Clone)]
pub struct ChannelResults {
    pub red: ChannelMetrics,
    pub green: ChannelMetrics,
    pub blue: ChannelMetrics,
    pub alpha: ChannelMetrics,
}

#[derive(Debug, Clone)]
pub struct ChannelMetrics {
    pub psnr: f64,
    pub mse: f64,
}

/// PSNR in dB for an MSE of values in 0.0..=1.0. Identical images have infinite PSNR.
pub fn psnr(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (1.0 / mse).log10()
    }
}

/// Calculates quality metrics over the first `channels` channels of two RGBA8 images.
pub fn calculate_image_metrics(
    original: &[u8],
    compressed: &[u8],
    width: u32,
    height: u32,
    channels: u32,
) -> PsnrResult {
    assert_eq!(
        original.len(),
        compressed.len(),
        "Image buffers must have same length"
    );
    assert_eq!(
        original.len(),
        (width * height * 4) as usize,
        "Buffer size doesn't match dimensions"
    );

    let mut channel_mse = [0.0; 4];
    let pixel_count = (width * height) as f64;

    for (orig, comp) in original.chunks_exact(4).zip(compressed.chunks_exact(4)) {
        for channel in 0..4 {
            let diff = (f64::from(orig[channel]) - f64::from(comp[channel])) / 255.0;
            channel_mse[channel] += diff * diff;
        }
    }

    // Normalize MSE values
    channel_mse.iter_mut().for_each(|mse| *mse /= pixel_count);

    let overall_mse = channel_mse[..channels as usize].iter().sum::<f64>() / channels as f64;

    let channel = |index: usize| ChannelMetrics {
        mse: channel_mse[index],
        psnr: psnr(channel_mse[index]),
    };

    PsnrResult {
        overall_psnr: psnr(overall_mse),
        overall_mse,
        channel_results: ChannelResults {
            red: channel(0),
            green: channel(1),
            blue: channel(2),
            alpha: channel(3),
        },
    }
}

/// Sum of squared channel differences between two pixel blocks.
pub fn block_squared_error(a: &[[u8; 4]; 16], b: &[[u8; 4]; 16]) -> u32 {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .map(|(&x, &y)| (i32::from(x) - i32::from(y)).pow(2) as u32)
        .sum()
}
