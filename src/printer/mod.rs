//! # Printer Configurations
//!
//! Paper width and resolution profiles for ESC/POS receipt printers.

pub mod config;

pub use config::PrinterConfig;
