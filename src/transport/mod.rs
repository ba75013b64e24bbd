//! # Printer Transport Layer
//!
//! Communication backends for sending ESC/POS data to printers.
//!
//! - [`network`]: raw TCP (port 9100) for network receipt printers
//!
//! Everything downstream of a transport only needs [`PrintSink`]: an ordered
//! byte sink that is closed exactly once.

pub mod network;

pub use network::{NetworkTransport, PrinterTarget};

use crate::error::Result;

/// An open printer connection.
///
/// `close` must be idempotent: closing an already closed sink is `Ok(())` and
/// does nothing.
pub trait PrintSink {
    /// Send bytes to the printer, in order.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Release the connection.
    fn close(&mut self) -> Result<()>;
}

impl<S: PrintSink + ?Sized> PrintSink for &mut S {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
