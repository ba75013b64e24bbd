//! # Rendering Module
//!
//! Turns a logo file into a printable raster image.
//!
//! - [`dither`]: Bayer 8x8 ordered dithering for binary conversion
//! - [`logo`]: load, scale and dither a PNG/JPEG logo

pub mod dither;
pub mod logo;
