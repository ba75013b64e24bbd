//! # ESC/POS Text Styling Commands
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Justify | ESC a n | Left / center / right |
//! | Font | ESC M n | Font A (12×24) or Font B (9×17) |
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Size | GS ! n | 1x-8x width and height |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// Applies to the next line that starts printing; resets on `ESC @`.
///
/// ## Example
///
/// ```
/// use ficha::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots, 48 columns on 80mm paper
    #[default]
    A = 0,
    /// Font B: 9×17 dots, 64 columns on 80mm paper
    B = 1,
}

/// # Select Character Font (ESC M n)
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// EMPHASIS / UNDERLINE
// ============================================================================

/// # Emphasized Mode (ESC E n)
///
/// ## Example
///
/// ```
/// use ficha::protocol::text;
///
/// assert_eq!(text::bold(true), vec![0x1B, 0x45, 0x01]);
/// assert_eq!(text::bold(false), vec![0x1B, 0x45, 0x00]);
/// ```
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// # Underline Mode (ESC - n)
///
/// `n = 1` draws a 1-dot underline, `n = 0` turns it off.
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', enabled as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Bits 4-6 of `n` hold the width multiplier, bits 0-2 the height multiplier.
///
/// ## Parameters
///
/// - `height_mult`, `width_mult`: 0 = 1x, 1 = 2x, ... 7 = 8x (clamped)
///
/// ## Example
///
/// ```
/// use ficha::protocol::text;
///
/// // Double width and height
/// assert_eq!(text::size(1, 1), vec![0x1D, 0x21, 0x11]);
/// // Normal
/// assert_eq!(text::size(0, 0), vec![0x1D, 0x21, 0x00]);
/// ```
pub fn size(height_mult: u8, width_mult: u8) -> Vec<u8> {
    let h = height_mult.min(7);
    let w = width_mult.min(7);
    vec![GS, b'!', (w << 4) | h]
}

/// Reset emphasis, underline and size to defaults without a full `ESC @`.
pub fn reset() -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    out.extend(bold(false));
    out.extend(underline(false));
    out.extend(size(0, 0));
    out
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode text for the printer's default code page.
///
/// Printable ASCII passes through; anything else is replaced with `?` since
/// the default ESC/POS code page (PC437) does not line up with UTF-8.
///
/// ## Example
///
/// ```
/// use ficha::protocol::text::encode;
///
/// assert_eq!(encode("Café"), b"Caf?".to_vec());
/// ```
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| {
            if c.is_ascii() && (!c.is_ascii_control() || c == '\t') {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}
