//! # Controller API
//!
//! HTTP client for the wireless controller's management API.
//!
//! ## Module Structure
//!
//! - [`config`]: base URL validation and controller flavor
//! - [`session`]: cookie lifecycle and ownership
//! - [`envelope`]: `{meta, data}` response decoding
//! - [`client`]: login, logout, and `execute` with one-shot reauthentication
//! - [`voucher`]: create, query and revoke hotspot vouchers
//! - [`site`]: site list and controller info

pub mod client;
pub mod config;
pub mod envelope;
pub mod request;
pub mod session;
pub mod site;
pub mod voucher;

pub use client::Client;
pub use config::{
    ControllerConfig, ControllerFlavor, DEFAULT_SITE, DEFAULT_TIMEOUT_SECS, validate_base_url,
};
pub use envelope::{LOGIN_REQUIRED, parse_envelope};
pub use request::ApiRequest;
pub use session::Session;
pub use site::{Site, SysInfo};
pub use voucher::{Voucher, VoucherSpec};
