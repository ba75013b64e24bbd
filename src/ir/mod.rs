//! # Intermediate Representation (IR)
//!
//! The IR is a "bytecode" representation that sits between declarative
//! components and raw ESC/POS bytes.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Optimizer │ ──► │ Codegen  │
//! │(declarative)│     │  (Vec<Op>)  │     │           │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └───────────┘     └──────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use ficha::ir::{Op, Program};
//! use ficha::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Cut { partial: false, lines: 3 });
//!
//! let bytes = program.optimize().to_bytes();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;
mod optimize;

pub use ops::*;
