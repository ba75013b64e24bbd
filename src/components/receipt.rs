//! # Receipt Component
//!
//! The root container for building receipts.

use super::Component;
use crate::ir::Op;
use crate::protocol::commands::DrawerPin;

/// Lines fed past the head before the cutter fires.
const CUT_FEED_LINES: u8 = 3;

/// Receipt is the root container component.
///
/// It holds child components and optionally ends with a cut and a drawer
/// pulse.
///
/// ## Example
///
/// ```
/// use ficha::components::*;
///
/// let receipt = Receipt::new()
///     .child(Text::new("GUEST WIFI").center())
///     .cut()
///     .pulse();
///
/// let bytes = receipt.build();
/// ```
pub struct Receipt {
    children: Vec<Box<dyn Component>>,
    auto_cut: bool,
    partial_cut: bool,
    pulse: bool,
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

impl Receipt {
    /// Create a new empty receipt.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            auto_cut: false,
            partial_cut: false,
            pulse: false,
        }
    }

    /// Add a child component.
    pub fn child<C: Component + 'static>(mut self, component: C) -> Self {
        self.children.push(Box::new(component));
        self
    }

    /// Add a child only when it is present.
    pub fn child_opt<C: Component + 'static>(self, component: Option<C>) -> Self {
        match component {
            Some(c) => self.child(c),
            None => self,
        }
    }

    /// Enable auto-cut at the end (full cut).
    pub fn cut(mut self) -> Self {
        self.auto_cut = true;
        self.partial_cut = false;
        self
    }

    /// Enable auto-cut at the end (partial cut, leaves hinge).
    pub fn partial_cut(mut self) -> Self {
        self.auto_cut = true;
        self.partial_cut = true;
        self
    }

    /// Kick the drawer port after the cut (opens a drawer or sounds a buzzer).
    pub fn pulse(mut self) -> Self {
        self.pulse = true;
        self
    }
}

impl Component for Receipt {
    fn emit(&self, ops: &mut Vec<Op>) {
        for child in &self.children {
            child.emit(ops);
        }

        if self.auto_cut {
            ops.push(Op::Cut {
                partial: self.partial_cut,
                lines: CUT_FEED_LINES,
            });
        }

        if self.pulse {
            ops.push(Op::Pulse {
                pin: DrawerPin::Pin2,
                on_ms: 120,
                off_ms: 240,
            });
        }
    }
}
