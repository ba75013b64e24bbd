//! # Logo Loading
//!
//! Loads the ticket header logo and converts it to a 1-bit raster sized for
//! the printer.
//!
//! Transparent pixels count as white so PNG logos with an alpha channel print
//! cleanly on receipt paper.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

use super::dither;
use crate::components::Image;
use crate::error::{FichaError, Result};

/// Load a logo from disk, scaled down to at most `max_width` dots.
pub fn load<P: AsRef<Path>>(path: P, max_width: u16) -> Result<Image> {
    let path = path.as_ref();
    let source = image::open(path)
        .map_err(|e| FichaError::Image(format!("Failed to load {}: {}", path.display(), e)))?;
    Ok(from_image(&source, max_width))
}

/// Decode a logo from an in-memory PNG/JPEG.
pub fn from_bytes(bytes: &[u8], max_width: u16) -> Result<Image> {
    let source = image::load_from_memory(bytes)
        .map_err(|e| FichaError::Image(format!("Failed to decode logo: {}", e)))?;
    Ok(from_image(&source, max_width))
}

/// Scale (never up) and dither an already decoded image.
pub fn from_image(source: &DynamicImage, max_width: u16) -> Image {
    let (src_w, src_h) = source.dimensions();
    let max_width = u32::from(max_width.max(1));

    let scaled = if src_w > max_width {
        let height = ((src_h as f32) * (max_width as f32 / src_w as f32)).round().max(1.0) as u32;
        source.resize_exact(max_width, height, FilterType::Lanczos3)
    } else {
        source.clone()
    };

    let gray = scaled.to_luma_alpha8();
    let (width, height) = gray.dimensions();
    let height = height.min(u32::from(u16::MAX));

    let data = dither::generate_raster(width as usize, height as usize, |x, y| {
        let pixel = gray.get_pixel(x as u32, y as u32);
        let darkness = 1.0 - pixel[0] as f32 / 255.0;
        let alpha = pixel[1] as f32 / 255.0;
        darkness * alpha
    });

    debug!(width, height, bytes = data.len(), "rendered logo raster");
    Image::from_raster(width as u16, height as u16, data)
}
