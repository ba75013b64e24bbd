//! # Text Components
//!
//! Components for displaying text with various styles.

use super::Component;
use crate::ir::Op;
use crate::protocol::text::{Alignment, Font};

/// A text component with optional styling.
///
/// ## Example
///
/// ```
/// use ficha::components::*;
///
/// // Simple text
/// let text = Text::new("Hello, World!");
///
/// // Styled text
/// let styled = Text::new("ABCDE-12345")
///     .bold()
///     .center()
///     .size(1, 1);
/// ```
pub struct Text {
    content: String,
    newline: bool,
    bold: bool,
    underline: bool,
    font: Option<Font>,
    alignment: Option<Alignment>,
    height_mult: u8,
    width_mult: u8,
}

impl Text {
    /// Create a new text component (ends with a newline).
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            newline: true,
            bold: false,
            underline: false,
            font: None,
            alignment: None,
            height_mult: 0,
            width_mult: 0,
        }
    }

    /// Create inline text (no trailing newline).
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            newline: false,
            ..Self::new(content)
        }
    }

    /// Make text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Underline the text.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Double the width only.
    pub fn double_width(mut self) -> Self {
        self.width_mult = 1;
        self
    }

    /// Double the height only.
    pub fn double_height(mut self) -> Self {
        self.height_mult = 1;
        self
    }

    /// Set character size multiplier.
    /// height/width: 0 = 1x, 1 = 2x, etc. Max 7 = 8x.
    pub fn size(mut self, height: u8, width: u8) -> Self {
        self.height_mult = height.min(7);
        self.width_mult = width.min(7);
        self
    }

    /// Use Font B (condensed).
    pub fn small(mut self) -> Self {
        self.font = Some(Font::B);
        self
    }

    /// Set the font.
    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Center the text.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    /// Right-align the text.
    pub fn right(mut self) -> Self {
        self.alignment = Some(Alignment::Right);
        self
    }

    /// Left-align the text (explicit).
    pub fn left(mut self) -> Self {
        self.alignment = Some(Alignment::Left);
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(align) = self.alignment {
            ops.push(Op::SetAlign(align));
        }
        if let Some(font) = self.font {
            ops.push(Op::SetFont(font));
        }
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        if self.underline {
            ops.push(Op::SetUnderline(true));
        }
        let sized = self.height_mult > 0 || self.width_mult > 0;
        if sized {
            ops.push(Op::SetSize {
                height: self.height_mult,
                width: self.width_mult,
            });
        }

        ops.push(Op::Text(self.content.clone()));
        if self.newline {
            ops.push(Op::Newline);
        }

        // Reset what was changed (reverse order); alignment persists
        if sized {
            ops.push(Op::SetSize {
                height: 0,
                width: 0,
            });
        }
        if self.underline {
            ops.push(Op::SetUnderline(false));
        }
        if self.bold {
            ops.push(Op::SetBold(false));
        }
        if self.font.is_some_and(|f| f != Font::A) {
            ops.push(Op::SetFont(Font::A));
        }
    }
}

/// A header component (centered, bold, large text).
pub struct Header {
    text: Text,
}

impl Header {
    /// Create a new double-size header.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: Text::new(content).center().bold().size(1, 1),
        }
    }

    /// Normal size, still bold and centered.
    pub fn small(content: impl Into<String>) -> Self {
        Self {
            text: Text::new(content).center().bold(),
        }
    }
}

impl Component for Header {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.text.emit(ops);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_simple_text() {
        let ir = Text::new("Hello").compile();
        assert!(ir.ops.iter().any(|op| *op == Op::Text("Hello".into())));
        assert!(ir.ops.iter().any(|op| *op == Op::Newline));
    }

    #[test]
    fn test_inline_text() {
        let ir = Text::inline("Hello").compile();
        assert!(!ir.ops.iter().any(|op| *op == Op::Newline));
    }

    #[test]
    fn test_bold_text() {
        let ir = Text::new("Bold").bold().compile();
        let bold_on = ir.ops.iter().position(|op| *op == Op::SetBold(true)).unwrap();
        let text = ir.ops.iter().position(|op| *op == Op::Text("Bold".into())).unwrap();
        let bold_off = ir.ops.iter().position(|op| *op == Op::SetBold(false)).unwrap();
        assert!(bold_on < text && text < bold_off);
    }

    #[test]
    fn test_size_reset_after_text() {
        let ir = Text::new("BIG").double_width().double_height().compile();
        assert_eq!(
            ir.ops[1],
            Op::SetSize {
                height: 1,
                width: 1
            }
        );
        assert_eq!(
            *ir.ops.last().unwrap(),
            Op::SetSize {
                height: 0,
                width: 0
            }
        );
    }

    #[test]
    fn test_small_font_restored() {
        let ir = Text::new("fine print").small().compile();
        assert_eq!(ir.ops[1], Op::SetFont(Font::B));
        assert_eq!(*ir.ops.last().unwrap(), Op::SetFont(Font::A));
    }

    #[test]
    fn test_header() {
        let ir = Header::new("GUEST WIFI").compile();
        assert!(ir.ops.iter().any(|op| *op == Op::SetAlign(Alignment::Center)));
        assert!(ir.ops.iter().any(|op| *op == Op::SetBold(true)));
    }
}
