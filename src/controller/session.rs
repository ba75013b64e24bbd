//! # Controller Session
//!
//! Holds the authentication state of one controller connection.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──login──► logged in ──401 LoginRequired──► invalidated ──login──► logged in
//!                      │
//!                      └──logout──► empty
//! ```
//!
//! A session built with [`Session::with_cookie`] starts logged in with a
//! cookie that belongs to the caller. The client never logs such a cookie
//! out; ownership moves to the client only if it has to log in again itself.

use std::fmt;

pub struct Session {
    base_url: String,
    site: String,
    cookie: Option<String>,
    csrf_token: Option<String>,
    logged_in: bool,
    owns_cookie: bool,
}

impl Session {
    /// Create an empty, logged-out session.
    pub fn new(base_url: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            site: site.into(),
            cookie: None,
            csrf_token: None,
            logged_in: false,
            owns_cookie: false,
        }
    }

    /// Reuse a cookie obtained elsewhere. The caller keeps ownership of it.
    pub fn with_cookie(
        base_url: impl Into<String>,
        site: impl Into<String>,
        cookie: impl Into<String>,
    ) -> Self {
        Self {
            cookie: Some(cookie.into()),
            logged_in: true,
            owns_cookie: false,
            ..Self::new(base_url, site)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// True if this client created the cookie and therefore must log it out.
    pub fn owns_cookie(&self) -> bool {
        self.owns_cookie
    }

    /// Record a successful login performed by this client.
    pub(crate) fn establish(&mut self, cookie: String, csrf_token: Option<String>) {
        self.cookie = Some(cookie);
        self.csrf_token = csrf_token;
        self.logged_in = true;
        self.owns_cookie = true;
    }

    /// Replace the CSRF token when the controller rotates it.
    pub(crate) fn update_csrf_token(&mut self, token: String) {
        self.csrf_token = Some(token);
    }

    /// Drop the cookie after the controller reported it expired.
    pub(crate) fn invalidate(&mut self) {
        self.cookie = None;
        self.csrf_token = None;
        self.logged_in = false;
    }

    /// Forget everything after a logout.
    pub(crate) fn clear(&mut self) {
        self.invalidate();
        self.owns_cookie = false;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("site", &self.site)
            .field("cookie", &self.cookie.as_ref().map(|_| "<set>"))
            .field("logged_in", &self.logged_in)
            .field("owns_cookie", &self.owns_cookie)
            .finish()
    }
}

/// Collect the `name=value` part of each `Set-Cookie` header into a single
/// `Cookie` header value.
///
/// Attributes (`Path`, `Expires`, `HttpOnly`, ...) are dropped, as are
/// cookies the server is clearing (empty value).
///
/// ## Example
///
/// ```
/// use ficha::controller::session::cookie_header;
///
/// let header = cookie_header([
///     "unifises=abc123; Path=/; Secure; HttpOnly",
///     "csrf_token=xyz; Path=/; Secure",
/// ]);
/// assert_eq!(header.as_deref(), Some("unifises=abc123; csrf_token=xyz"));
/// ```
pub fn cookie_header<'a>(set_cookies: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let pairs: Vec<&str> = set_cookies
        .into_iter()
        .filter_map(|raw| raw.split(';').next())
        .map(str::trim)
        .filter(|pair| {
            pair.split_once('=')
                .is_some_and(|(name, value)| !name.is_empty() && !value.is_empty())
        })
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
