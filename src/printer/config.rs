//! # Printer Configuration
//!
//! Hardware characteristics of ESC/POS receipt printers.
//!
//! | Profile | Paper | Width (dots) | Columns (Font A) |
//! |---------|-------|--------------|------------------|
//! | `RECEIPT_80MM` | 80mm | 576 | 48 |
//! | `RECEIPT_58MM` | 58mm | 384 | 32 |
//!
//! ## Usage
//!
//! ```
//! use ficha::printer::PrinterConfig;
//!
//! let config = PrinterConfig::RECEIPT_80MM;
//! assert_eq!(config.width_bytes(), 72);
//! ```

/// # Printer Configuration
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
///
/// For an 80mm printer:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 576 / 8 = 72mm printable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Profile name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Characters per line in Font A at normal size
    pub columns: u8,

    /// Maximum rows per raster command (receive buffer limit)
    pub max_chunk_rows: u16,
}

impl PrinterConfig {
    /// 80mm paper, 72mm printable, 203 DPI.
    pub const RECEIPT_80MM: Self = Self {
        name: "80mm",
        width_dots: 576,
        dpi: 203,
        columns: 48,
        max_chunk_rows: 256,
    };

    /// 58mm paper, 48mm printable, 203 DPI.
    pub const RECEIPT_58MM: Self = Self {
        name: "58mm",
        width_dots: 384,
        dpi: 203,
        columns: 32,
        max_chunk_rows: 256,
    };

    /// Width in bytes (width_dots / 8, rounded up)
    #[inline]
    pub fn width_bytes(&self) -> u16 {
        self.width_dots.div_ceil(8)
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f32) -> u16 {
        (mm * self.dots_per_mm()).round() as u16
    }

    /// Look up a profile by paper width name (`80mm`, `58mm`, `80`, `58`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().trim_end_matches("mm") {
            "80" => Ok(Self::RECEIPT_80MM),
            "58" => Ok(Self::RECEIPT_58MM),
            other => Err(format!("unknown paper width '{}' (expected 80mm or 58mm)", other)),
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::RECEIPT_80MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_80mm() {
        let config = PrinterConfig::RECEIPT_80MM;
        assert_eq!(config.width_bytes(), 72);
        assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
        assert_eq!(config.mm_to_dots(10.0), 80);
    }

    #[test]
    fn test_parse() {
        assert_eq!(PrinterConfig::parse("58mm"), Ok(PrinterConfig::RECEIPT_58MM));
        assert_eq!(PrinterConfig::parse("80"), Ok(PrinterConfig::RECEIPT_80MM));
        assert!(PrinterConfig::parse("112mm").is_err());
    }
}
