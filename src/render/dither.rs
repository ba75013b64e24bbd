//! # Bayer 8x8 Ordered Dithering
//!
//! Converts grayscale logo pixels to the 1-bit dots a thermal head can print.
//!
//! For each pixel position (x, y):
//!
//! 1. Look up a threshold from the matrix using (x mod 8, y mod 8)
//! 2. Compare the pixel's intensity to the threshold
//! 3. If intensity > threshold, print black; otherwise leave white
//!
//! Ordered dithering is deterministic and has no error propagation, so a logo
//! prints identically on every ticket.
//!
//! ## Usage Example
//!
//! ```
//! use ficha::render::dither;
//!
//! let row: Vec<bool> = vec![true, true, false, false, true, false, true, false];
//! assert_eq!(dither::pack_row(&row), vec![0b11001010]);
//! ```

/// Bayer 8x8 dithering matrix (values 0-63)
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Dithering threshold for a pixel position, in (0, 1).
///
/// `(matrix_value + 0.5) / 64` keeps full black always printing and full
/// white never printing.
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Whether a dot should be printed. `intensity`: 0.0 = white, 1.0 = black.
///
/// ```
/// use ficha::render::dither::should_print;
///
/// assert!(should_print(0, 0, 1.0));
/// assert!(!should_print(0, 0, 0.0));
/// ```
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Pack a row of pixels (true = black) into MSB-first bytes, padding the
/// last byte with white.
///
/// ```
/// use ficha::render::dither::pack_row;
///
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

/// Generate a dithered raster from an intensity function `(x, y) -> 0.0..=1.0`.
///
/// Returns `ceil(width/8) * height` bytes.
pub fn generate_raster<F>(width: usize, height: usize, intensity_fn: F) -> Vec<u8>
where
    F: Fn(usize, usize) -> f32,
{
    let width_bytes = width.div_ceil(8);
    let mut data = Vec::with_capacity(width_bytes * height);
    let mut row_pixels = Vec::with_capacity(width);

    for y in 0..height {
        row_pixels.clear();
        for x in 0..width {
            row_pixels.push(should_print(x, y, intensity_fn(x, y)));
        }
        data.extend(pack_row(&row_pixels));
    }

    data
}
