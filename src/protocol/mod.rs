//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, feed, cut, drawer pulse)
//! - [`graphics`]: Raster bit images
//! - [`text`]: Text styling (justification, fonts, emphasis, size)
//!
//! ## Usage Example
//!
//! ```
//! use ficha::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"GUEST WIFI\n");
//! data.extend(text::bold(false));
//! data.extend(commands::cut(false, 3));
//!
//! // Send `data` to printer via transport...
//! ```

pub mod commands;
pub mod graphics;
pub mod text;
