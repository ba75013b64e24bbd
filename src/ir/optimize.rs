//! # IR Optimizer
//!
//! ## Optimization Passes
//!
//! 1. **Remove redundant init**: Only keep the first Init op
//! 2. **Collapse style toggles**: `SetBold(false), SetBold(true)` cancel out
//! 3. **Remove redundant styles**: Don't emit SetBold(true) if already bold
//! 4. **Merge adjacent text**: Combine consecutive Text ops

use super::ops::{Op, Program, StyleState};

impl Program {
    /// Apply all optimization passes.
    pub fn optimize(self) -> Self {
        let ops = self.ops;
        let ops = remove_redundant_init(ops);
        let ops = collapse_style_toggles(ops);
        let ops = remove_redundant_styles(ops);
        let ops = merge_adjacent_text(ops);
        Program { ops }
    }
}

/// Remove off/on pairs left behind when one styled Text follows another.
fn collapse_style_toggles(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut i = 0;

    while i < ops.len() {
        if i + 1 < ops.len() {
            let collapse = matches!(
                (&ops[i], &ops[i + 1]),
                (Op::SetBold(false), Op::SetBold(true))
                    | (Op::SetUnderline(false), Op::SetUnderline(true))
            );
            if collapse {
                i += 2;
                continue;
            }
        }

        result.push(ops[i].clone());
        i += 1;
    }

    result
}

fn remove_redundant_init(ops: Vec<Op>) -> Vec<Op> {
    let mut seen_init = false;
    ops.into_iter()
        .filter(|op| {
            if matches!(op, Op::Init) {
                if seen_init {
                    return false;
                }
                seen_init = true;
            }
            true
        })
        .collect()
}

/// Remove style changes that don't change the current state.
fn remove_redundant_styles(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut state = StyleState::default();

    for op in ops {
        match &op {
            Op::Init => {
                state = StyleState::default();
                result.push(op);
            }
            Op::ResetStyle => {
                // ResetStyle leaves alignment and font alone
                state = StyleState {
                    alignment: state.alignment,
                    font: state.font,
                    ..StyleState::default()
                };
                result.push(op);
            }
            Op::SetAlign(a) => {
                if *a != state.alignment {
                    state.alignment = *a;
                    result.push(op);
                }
            }
            Op::SetFont(f) => {
                if *f != state.font {
                    state.font = *f;
                    result.push(op);
                }
            }
            Op::SetBold(b) => {
                if *b != state.bold {
                    state.bold = *b;
                    result.push(op);
                }
            }
            Op::SetUnderline(u) => {
                if *u != state.underline {
                    state.underline = *u;
                    result.push(op);
                }
            }
            Op::SetSize { height, width } => {
                if *height != state.height_mult || *width != state.width_mult {
                    state.height_mult = *height;
                    state.width_mult = *width;
                    result.push(op);
                }
            }
            _ => result.push(op),
        }
    }

    result
}

fn merge_adjacent_text(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut pending_text: Option<String> = None;

    for op in ops {
        match op {
            Op::Text(s) => match pending_text {
                Some(ref mut pending) => pending.push_str(&s),
                None => pending_text = Some(s),
            },
            other => {
                if let Some(text) = pending_text.take() {
                    result.push(Op::Text(text));
                }
                result.push(other);
            }
        }
    }

    if let Some(text) = pending_text {
        result.push(Op::Text(text));
    }

    result
}
