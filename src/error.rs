//! # Error Types
//!
//! This module defines error types used throughout the ficha library.

use thiserror::Error;

/// Why the controller refused to authenticate this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The login endpoint answered with a non-success status.
    ///
    /// A `400` is what the controller sends for bad credentials; anything else
    /// means the login endpoint itself is unhappy (wrong flavor, proxy, etc).
    LoginRejected { status: u16 },

    /// The session expired and the single reauthentication attempt did not
    /// recover it.
    SessionExpired,
}

impl AuthFailure {
    /// True when the controller most likely rejected the credentials.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(self, AuthFailure::LoginRejected { status: 400 })
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFailure::LoginRejected { status: 400 } => {
                write!(f, "login rejected (HTTP 400, check username and password)")
            }
            AuthFailure::LoginRejected { status } => write!(f, "login rejected (HTTP {})", status),
            AuthFailure::SessionExpired => {
                write!(f, "session expired and reauthentication failed")
            }
        }
    }
}

/// Main error type for ficha operations
#[derive(Debug, Error)]
pub enum FichaError {
    /// Malformed configuration (base URL, site, duration)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection-level failure talking to the controller (TLS, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A request was attempted before any successful login
    #[error("Not authenticated: login has not succeeded for this session")]
    NotAuthenticated,

    /// Login rejected or reauthentication exhausted
    #[error("Authentication error: {0}")]
    Auth(AuthFailure),

    /// The controller answered with `rc == "error"`
    #[error("Controller error: {0}")]
    Api(String),

    /// The call succeeded but returned no records
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// The controller body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Printer connection or write failure
    #[error("Printer error: {0}")]
    Printer(String),

    /// Logo image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FichaError>;
