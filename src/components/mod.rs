//! # Declarative Components
//!
//! React-like components for building receipts declaratively.
//!
//! ```
//! use ficha::components::*;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("GUEST WIFI").center().bold())
//!     .child(Divider::dashed())
//!     .child(Text::new("ABCDE-12345").center().size(1, 1))
//!     .cut();
//!
//! // Compile to IR (inspectable)
//! let ir = receipt.compile();
//! println!("{:#?}", ir);
//!
//! // Generate bytes
//! let bytes = receipt.build();
//! ```
//!
//! All components implement the `Component` trait, which emits IR ops.
//! Containers hold children.

mod graphics;
mod layout;
mod receipt;
mod text;

pub use graphics::*;
pub use layout::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{Op, Program};
use crate::printer::PrinterConfig;

/// Trait for declarative components.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program starting with Init.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }

    /// Compile, optimize, and generate bytes.
    fn build(&self) -> Vec<u8> {
        self.build_with_config(&PrinterConfig::RECEIPT_80MM)
    }

    /// Compile, optimize, and generate bytes with a specific printer config.
    fn build_with_config(&self, config: &PrinterConfig) -> Vec<u8> {
        self.compile().optimize().to_bytes_with_config(config)
    }
}

impl<T: Component> ComponentExt for T {}

impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}
