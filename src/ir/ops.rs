//! # IR Opcodes
//!
//! The print job as an ordered list of opcodes that can be inspected,
//! optimized, and compiled to ESC/POS bytes.
//!
//! ```text
//! Components → IR (inspectable) → Optimizer → Codegen → Bytes
//! ```
//!
//! Each opcode is a single atomic printer operation. Style changes are
//! individual ops (not combined) so the optimizer can drop redundant ones.

use crate::protocol::commands::DrawerPin;
use crate::protocol::text::{Alignment, Font};

/// Style state tracked for optimization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleState {
    pub alignment: Alignment,
    pub font: Font,
    pub bold: bool,
    pub underline: bool,
    pub height_mult: u8,
    pub width_mult: u8,
}

/// IR opcodes - the "bytecode" for receipt printing.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Feed `lines` lines, then cut. `partial: true` leaves a small hinge.
    Cut { partial: bool, lines: u8 },

    /// Feed paper by dots (ESC J).
    Feed { dots: u8 },

    /// Feed paper by lines (ESC d).
    FeedLines(u8),

    /// Kick the cash drawer / buzzer port (ESC p).
    Pulse { pin: DrawerPin, on_ms: u16, off_ms: u16 },

    // ========== Style Changes ==========
    /// Set justification.
    SetAlign(Alignment),

    /// Set font (A or B).
    SetFont(Font),

    /// Enable/disable emphasis.
    SetBold(bool),

    /// Enable/disable underline.
    SetUnderline(bool),

    /// Set character size multiplier (GS !).
    /// height/width: 0 = 1x, 1 = 2x, ... 7 = 8x
    SetSize { height: u8, width: u8 },

    /// Reset emphasis, underline and size.
    ResetStyle,

    // ========== Content ==========
    /// Raw text (no trailing newline).
    Text(String),

    /// Line feed (newline).
    Newline,

    /// Raw bytes (direct protocol access).
    Raw(Vec<u8>),

    // ========== Graphics ==========
    /// Raster bit image (GS v 0).
    Raster {
        width: u16,
        height: u16,
        data: Vec<u8>,
    },
}

/// A compiled IR program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// All text content, one entry per Text op. Handy for asserting layout.
    pub fn text_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
