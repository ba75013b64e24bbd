//! # ESC/POS Raster Graphics
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```

use super::commands::{GS, u16_le};

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Field | Meaning |
/// |-------|---------|
/// | `m` | 0 = normal density |
/// | `xL xH` | width in **bytes** |
/// | `yL yH` | height in dots |
///
/// ## Example
///
/// ```
/// use ficha::protocol::graphics;
///
/// let data = vec![0xAA; 2 * 3];
/// let cmd = graphics::raster(16, 3, &data);
/// assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 2, 0, 3, 0]);
/// assert_eq!(cmd.len(), 8 + 6);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    let expected_len = width_bytes as usize * height as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend([GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 72 * 10];
        let cmd = raster(576, 10, &data);
        assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 72, 0, 10, 0]);
        assert_eq!(cmd.len(), 8 + 720);
    }

    #[test]
    fn test_raster_rounds_width_up() {
        let data = vec![0x00; 2];
        let cmd = raster(9, 1, &data);
        assert_eq!(cmd[4], 2);
    }
}
