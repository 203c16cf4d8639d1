//! # Output Module
//!
//! Writes rendered frames to disk. The format is chosen from the file extension:
//! - `.png`: 8-bit sRGB, values clamped to [0, 1]
//! - `.exr`: 32-bit float linear RGB, no tone mapping

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{info, warn};

use crate::camera::Frame;
use crate::error::{Error, Result};

/// Write `image` to `path`, picking the encoder from the extension.
///
/// Extensions other than `png` and `exr` fail with [`Error::UnsupportedOutput`].
pub fn store(image: &Frame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_image_as_png(image, path),
        "exr" => save_image_as_exr(image, path),
        _ => {
            warn!("Cannot write {}: unknown image format", path.display());
            Err(Error::UnsupportedOutput(extension))
        }
    }
}

/// sRGB transfer curve with the linear segment for very dark values.
fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Quantize a linear channel value to an 8-bit sRGB code.
fn to_srgb8(linear: f32) -> u8 {
    (linear_to_srgb(linear.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Save a linear f32 RGB frame as an 8-bit sRGB PNG.
pub fn save_image_as_png(image: &Frame, path: &Path) -> Result<()> {
    let ldr: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_srgb8(pixel[0]), to_srgb8(pixel[1]), to_srgb8(pixel[2])])
    });

    ldr.save(path)?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save a linear f32 RGB frame as an OpenEXR file with full HDR precision.
pub fn save_image_as_exr(image: &Frame, path: &Path) -> Result<()> {
    write_rgb_file(path, image.width() as usize, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", path.display());
    Ok(())
}
