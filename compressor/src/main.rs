use std::{fs::File, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use bc7_compression::{blocks_byte_size, decode::decompress_blocks, BC7Settings};
#[cfg(not(feature = "rayon"))]
use bc7_compression::encode::compress_rgba8 as compress;
#[cfg(feature = "rayon")]
use bc7_compression::encode::compress_rgba8_parallel as compress;
use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
use env_logger::Env;
use image::{ImageReader, RgbaImage};

struct Args {
    settings: BC7Settings,
    verify: bool,
    file_name: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let start = Instant::now();

    let image = ImageReader::open(&args.file_name)
        .with_context(|| format!("can't open input image {}", args.file_name))?
        .decode()
        .with_context(|| format!("can't decode image {}", args.file_name))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        bail!("{} has no pixels", args.file_name);
    }
    let padded = pad_to_blocks(&image);

    log::info!(
        "Image read of {width}x{height} pixels took: {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();

    let mut blocks = vec![0; blocks_byte_size(width, height)];
    compress(
        padded.as_raw(),
        &mut blocks,
        padded.width(),
        padded.height(),
        padded.width() * 4,
        &args.settings,
    )
    .context("failed to compress image")?;

    log::info!(
        "BC7 compression took: {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if args.verify {
        let start = Instant::now();

        let mut decoded = vec![0; (width * height * 4) as usize];
        decompress_blocks(width, height, &blocks, &mut decoded)
            .context("failed to decode compressed blocks")?;
        let psnr = psnr(image.as_raw(), &decoded);

        log::info!(
            "Verification took: {:.3} ms, PSNR: {psnr:.2} dB",
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let start = Instant::now();

    let dds_name = write_dds_file(&args.file_name, width, height, blocks)?;

    log::info!(
        "DDS output to {} took: {:.3} ms",
        dds_name.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

/// Extends the image to a multiple of 4 in both directions by repeating its edge pixels.
fn pad_to_blocks(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let padded_width = width.next_multiple_of(4);
    let padded_height = height.next_multiple_of(4);

    if padded_width == width && padded_height == height {
        return image.clone();
    }

    RgbaImage::from_fn(padded_width, padded_height, |x, y| {
        *image.get_pixel(x.min(width - 1), y.min(height - 1))
    })
}

/// PSNR over all four channels of two RGBA8 buffers.
fn psnr(original: &[u8], decoded: &[u8]) -> f64 {
    let original: &[[u8; 4]] = bytemuck::cast_slice(original);
    let decoded: &[[u8; 4]] = bytemuck::cast_slice(decoded);

    let squared_error: f64 = original
        .iter()
        .flatten()
        .zip(decoded.iter().flatten())
        .map(|(&a, &b)| (f64::from(a) - f64::from(b)).powi(2))
        .sum();
    let mse = squared_error / (original.len() * 4) as f64;

    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (255.0 * 255.0 / mse).log10()
    }
}

fn write_dds_file(file_name: &str, width: u32, height: u32, block_data: Vec<u8>) -> Result<PathBuf> {
    let mut dds = Dds::new_dxgi(NewDxgiParams {
        height,
        width,
        depth: None,
        format: DxgiFormat::BC7_UNorm_sRGB,
        mipmap_levels: Some(1),
        array_layers: None,
        caps2: None,
        is_cubemap: false,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Straight,
    })
    .context("failed to create DDS header")?;

    dds.data = block_data;

    let mut dds_name = PathBuf::from(file_name);
    dds_name.set_extension("dds");

    let mut file = File::create(&dds_name)
        .with_context(|| format!("failed to create output file {}", dds_name.display()))?;
    dds.write(&mut file).context("failed to write DDS file")?;

    Ok(dds_name)
}

fn print_help() {
    println!("Usage: compressor [options] <input_file>");
    println!("\nWrites <input_file> as BC7 compressed <input_file>.dds");
    println!("\nOptions:");
    println!("  --quick      - Only try mode 6");
    println!("  --basic      - Try every mode except the 3 region modes (default)");
    println!("  --slow       - Try every mode");
    println!("  --very-slow  - Try every mode and refine every shape");
    println!("  --validate   - Re-decode every block and log invariant violations");
    println!("  --verify     - Decode the result and log its PSNR");
    println!("  --help       - Show this help");
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "--help") {
        print_help();
        return Ok(None);
    }

    let mut settings = BC7Settings::basic();
    let mut validate = false;
    let mut verify = false;
    let mut file_name = None;

    for arg in args {
        match arg.as_str() {
            "--quick" => settings = BC7Settings::quick(),
            "--basic" => settings = BC7Settings::basic(),
            "--slow" => settings = BC7Settings::slow(),
            "--very-slow" => settings = BC7Settings::very_slow(),
            "--validate" => validate = true,
            "--verify" => verify = true,
            flag if flag.starts_with("--") => {
                print_help();
                bail!("unknown option {flag}");
            }
            _ if file_name.is_some() => {
                print_help();
                bail!("only one input file is supported");
            }
            _ => file_name = Some(arg.clone()),
        }
    }

    let Some(file_name) = file_name else {
        print_help();
        bail!("missing input file");
    };

    Ok(Some(Args {
        settings: settings.with_validation(validate),
        verify,
        file_name,
    }))
}
