//! # Layout Components
//!
//! Components for controlling layout and spacing.

use super::Component;
use crate::ir::Op;
use crate::protocol::text::Alignment;

/// Divider style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerStyle {
    /// Dashed line (default): ------------
    #[default]
    Dashed,
    /// Equals line: ============
    Equals,
    /// Dotted line: ............
    Dotted,
}

/// A horizontal divider line.
///
/// ## Example
///
/// ```
/// use ficha::components::{Divider, DividerStyle};
///
/// let dashed = Divider::dashed();
/// let equals = Divider::new(DividerStyle::Equals).width(32);
/// ```
pub struct Divider {
    style: DividerStyle,
    width: usize,
}

impl Divider {
    pub fn new(style: DividerStyle) -> Self {
        Self { style, width: 48 }
    }

    pub fn dashed() -> Self {
        Self::new(DividerStyle::Dashed)
    }

    pub fn equals() -> Self {
        Self::new(DividerStyle::Equals)
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::dashed()
    }
}

impl Component for Divider {
    fn emit(&self, ops: &mut Vec<Op>) {
        let ch = match self.style {
            DividerStyle::Dashed => "-",
            DividerStyle::Equals => "=",
            DividerStyle::Dotted => ".",
        };
        ops.push(Op::SetAlign(Alignment::Left));
        ops.push(Op::Text(ch.repeat(self.width)));
        ops.push(Op::Newline);
    }
}

/// A vertical spacer (paper feed).
///
/// ## Example
///
/// ```
/// use ficha::components::Spacer;
///
/// let small = Spacer::mm(2.0);
/// let lines = Spacer::lines(3);
/// ```
pub enum Spacer {
    Dots(u8),
    Lines(u8),
}

impl Spacer {
    /// Feed a specific height in millimeters (8 dots per mm).
    pub fn mm(mm: f32) -> Self {
        Spacer::Dots((mm * 8.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Feed N text lines.
    pub fn lines(n: u8) -> Self {
        Spacer::Lines(n)
    }
}

impl Component for Spacer {
    fn emit(&self, ops: &mut Vec<Op>) {
        match *self {
            Spacer::Dots(0) | Spacer::Lines(0) => {}
            Spacer::Dots(dots) => ops.push(Op::Feed { dots }),
            Spacer::Lines(n) => ops.push(Op::FeedLines(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_dashed_divider() {
        let ir = Divider::dashed().width(10).compile();
        assert_eq!(ir.text_lines(), vec!["----------"]);
    }

    #[test]
    fn test_spacer_mm() {
        let ir = Spacer::mm(2.0).compile();
        assert_eq!(ir.ops[1], Op::Feed { dots: 16 });
    }

    #[test]
    fn test_zero_spacer_emits_nothing() {
        assert_eq!(Spacer::lines(0).compile().len(), 1);
        assert_eq!(Spacer::mm(0.0).compile().len(), 1);
    }
}
