//! PNG input and output.
//!
//! The effect works on packed RGB8, so everything read is normalized to
//! that: palettes expanded, 16-bit stripped, gray widened, alpha dropped.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Packed 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Reads a PNG file as RGB8.
pub fn read_rgb(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let buf_size = reader.output_buffer_size().context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let buf = &buf[..info.buffer_size()];

    let data = match info.color_type {
        png::ColorType::Rgb => buf.to_vec(),
        png::ColorType::Rgba => buf.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => {
            buf.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect()
        }
        other => bail!("Unsupported PNG color type {:?} in {}", other, path.display()),
    };

    Ok(RgbImage {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Writes packed RGB8 as PNG.
pub fn write_rgb(path: &Path, image: &RgbImage) -> Result<()> {
    write(path, image.width, image.height, png::ColorType::Rgb, &image.data)
}

/// Writes one byte per pixel as a grayscale PNG.
pub fn write_gray(path: &Path, width: u32, height: u32, data: &[u8]) -> Result<()> {
    write(path, width, height, png::ColorType::Grayscale, data)
}

fn write(path: &Path, width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    if color == png::ColorType::Rgb {
        encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);
    }

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    writer
        .write_image_data(data)
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    writer.finish().with_context(|| format!("Failed to encode: {}", path.display()))?;
    Ok(())
}
