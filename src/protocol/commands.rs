//! # ESC/POS Printer Control Commands
//!
//! Initialization, paper feed, cutter and drawer-kick commands for ESC/POS
//! receipt printers (Epson TM series and the many compatibles).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V m n`, `ESC p m t1 t2`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter and raster image commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text formatting, alignment and line
/// spacing to power-on defaults. Sent at the start of every job.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Cut (GS V m n)
///
/// Feeds `lines` lines past the print head, then cuts.
///
/// ## Protocol Details
///
/// | Format  | Bytes        |
/// |---------|--------------|
/// | ASCII   | GS V m n     |
/// | Hex     | 1D 56 41 n   |
///
/// ## Parameters
///
/// - `m = 65`: full cut after feeding
/// - `m = 66`: partial cut after feeding (leaves a hinge)
/// - `n`: feed amount in lines
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands;
///
/// assert_eq!(commands::cut(false, 3), vec![0x1D, 0x56, 65, 3]);
/// assert_eq!(commands::cut(true, 3), vec![0x1D, 0x56, 66, 3]);
/// ```
#[inline]
pub fn cut(partial: bool, lines: u8) -> Vec<u8> {
    let mode = if partial { 66 } else { 65 };
    vec![GS, b'V', mode, lines]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed Lines (ESC d n)
///
/// Prints the line buffer and feeds `n` lines.
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands;
///
/// assert_eq!(commands::feed_lines(2), vec![0x1B, 0x64, 2]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Print and Feed Dots (ESC J n)
///
/// Prints the line buffer and feeds `n` motion units (one dot on a 203 DPI
/// head, roughly 0.125mm).
#[inline]
pub fn feed_dots(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// Feed paper by millimeters (convenience wrapper for `feed_dots`)
///
/// Assumes 8 dots per millimeter (203 DPI).
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands;
///
/// assert_eq!(commands::feed_mm(3.0), vec![0x1B, 0x4A, 24]);
/// ```
#[inline]
pub fn feed_mm(mm: f32) -> Vec<u8> {
    let dots = (mm * 8.0).round().clamp(0.0, 255.0) as u8;
    feed_dots(dots)
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// Drawer-kick connector pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerPin {
    /// Connector pin 2
    #[default]
    Pin2 = 0,
    /// Connector pin 5
    Pin5 = 1,
}

/// # Generate Pulse (ESC p m t1 t2)
///
/// Sends a pulse to the drawer-kick connector. Also used to trigger buzzers
/// wired to the same port.
///
/// ## Parameters
///
/// - `pin`: which connector pin to drive
/// - `on_ms`, `off_ms`: pulse timing; the printer counts in 2ms units, so odd
///   values round down
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands::{self, DrawerPin};
///
/// assert_eq!(
///     commands::pulse(DrawerPin::Pin2, 120, 240),
///     vec![0x1B, 0x70, 48, 60, 120]
/// );
/// ```
#[inline]
pub fn pulse(pin: DrawerPin, on_ms: u16, off_ms: u16) -> Vec<u8> {
    let t1 = (on_ms / 2).min(255) as u8;
    let t2 = (off_ms / 2).min(255) as u8;
    vec![ESC, b'p', b'0' + pin as u8, t1, t2]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use ficha::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}
