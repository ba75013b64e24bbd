//! # Ficha - Guest Wi-Fi Voucher Printer
//!
//! Ficha issues guest-access vouchers on a network controller and prints them
//! on an ESC/POS receipt printer. It provides:
//!
//! - **Controller client**: cookie-session HTTP client with one-shot
//!   reauthentication on session expiry
//! - **Voucher wrappers**: create, look up and revoke hotspot vouchers
//! - **Ticket layout**: declarative receipt components compiled to ESC/POS
//! - **Transport**: raw TCP (port 9100) printer connection
//!
//! ## Quick Start
//!
//! ```no_run
//! use ficha::{
//!     controller::{Client, ControllerConfig},
//!     issue::{IssueRequest, issue_and_print},
//!     ticket::TicketLayout,
//!     transport::{NetworkTransport, PrinterTarget},
//! };
//!
//! # async fn demo() -> Result<(), ficha::FichaError> {
//! let config = ControllerConfig::new("https://unifi.lan:8443", "admin", "secret");
//! let mut client = Client::new(config)?;
//! client.login().await?;
//!
//! let printer = NetworkTransport::open(&PrinterTarget::parse("192.168.1.50")?)?;
//! let layout = TicketLayout::new().title("GUEST WIFI");
//! let issued = issue_and_print(&mut client, printer, &IssueRequest::new(24), &layout).await?;
//! println!("printed {}", issued.ticket.code);
//!
//! client.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`controller`] | Session client, envelope parsing, endpoint wrappers |
//! | [`issue`] | Issue a voucher and print its ticket |
//! | [`ticket`] | Code/duration formatting and ticket layout |
//! | [`components`] | Declarative receipt components |
//! | [`ir`] | Printer op IR, optimizer and ESC/POS codegen |
//! | [`protocol`] | ESC/POS command builders |
//! | [`render`] | Logo loading and dithering |
//! | [`transport`] | Printer connections |
//! | [`printer`] | Paper width profiles |
//! | [`error`] | Error types |

pub mod components;
pub mod controller;
pub mod error;
pub mod ir;
pub mod issue;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod ticket;
pub mod transport;

// Re-exports for convenience
pub use controller::Client;
pub use error::FichaError;
pub use printer::PrinterConfig;
