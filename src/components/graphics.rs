//! # Graphics Components

use super::Component;
use crate::ir::Op;
use crate::protocol::text::Alignment;

/// A raster image component, printed centered.
///
/// ## Example
///
/// ```
/// use ficha::components::*;
///
/// // 16x2 image, all black
/// let img = Image::from_raster(16, 2, vec![0xFF; 4]);
/// let ir = img.compile();
/// assert_eq!(ir.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Image {
    /// Create an image from packed raster data.
    ///
    /// Data is 1 bit per pixel, MSB first, `ceil(width/8) * height` bytes.
    pub fn from_raster(width: u16, height: u16, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

impl Component for Image {
    fn emit(&self, ops: &mut Vec<Op>) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        ops.push(Op::SetAlign(Alignment::Center));
        ops.push(Op::Raster {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_image_emits_raster() {
        let ir = Image::from_raster(8, 1, vec![0xAA]).compile();
        assert_eq!(
            ir.ops[2],
            Op::Raster {
                width: 8,
                height: 1,
                data: vec![0xAA]
            }
        );
    }

    #[test]
    fn test_empty_image_skipped() {
        let ir = Image::from_raster(0, 0, Vec::new()).compile();
        assert_eq!(ir.len(), 1);
    }
}
