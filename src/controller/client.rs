//! # Session Client
//!
//! Authenticated request/response cycles against the controller.
//!
//! The client owns a [`Session`] and hides cookie expiry from callers: when a
//! request comes back `401` with the controller's "login required" message,
//! the client logs in again once and replays the request once. A second
//! expiry, or a failed re-login, ends the call with
//! [`AuthFailure::SessionExpired`].
//!
//! ## Example
//!
//! ```no_run
//! use ficha::controller::{ApiRequest, Client, ControllerConfig};
//!
//! # async fn example() -> Result<(), ficha::FichaError> {
//! let config = ControllerConfig::new("https://unifi.lan:8443", "admin", "secret");
//! let mut client = Client::new(config)?;
//! client.login().await?;
//!
//! let sites = client.execute(&ApiRequest::new("/api/self/sites")).await?;
//! println!("{}", sites);
//!
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, SET_COOKIE};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::config::{ControllerConfig, ControllerFlavor};
use super::envelope::{is_login_required, parse_envelope};
use super::request::ApiRequest;
use super::session::{Session, cookie_header};
use crate::error::{AuthFailure, FichaError, Result};

const CSRF_HEADER: &str = "x-csrf-token";
const UPDATED_CSRF_HEADER: &str = "x-updated-csrf-token";

/// A raw controller reply before envelope decoding.
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl RawResponse {
    fn is_login_required(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED && is_login_required(&self.body)
    }
}

/// Controller API client.
pub struct Client {
    http: reqwest::Client,
    config: ControllerConfig,
    session: Session,
}

impl Client {
    /// Create a logged-out client. Call [`Client::login`] before anything else.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let session = Session::new(config.base_url.clone(), config.site.clone());
        Ok(Self {
            http: build_http_client(&config)?,
            config,
            session,
        })
    }

    /// Create a client that reuses a session cookie owned by the caller.
    ///
    /// No login is needed, and [`Client::logout`] leaves the cookie alone.
    pub fn with_cookie(config: ControllerConfig, cookie: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let session = Session::with_cookie(config.base_url.clone(), config.site.clone(), cookie);
        Ok(Self {
            http: build_http_client(&config)?,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Path of a site-scoped endpoint, e.g. `site_path("stat/voucher")`.
    pub fn site_path(&self, endpoint: &str) -> String {
        format!("/api/s/{}/{}", self.session.site(), endpoint.trim_start_matches('/'))
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.session.base_url(),
            self.config.flavor.api_prefix(),
            path
        )
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{}", self.session.base_url(), path)
    }

    /// Log in with the configured credentials.
    ///
    /// Any non-2xx status is reported as [`AuthFailure::LoginRejected`]
    /// carrying the status; `400` is what the controller answers for bad
    /// credentials.
    pub async fn login(&mut self) -> Result<()> {
        if self.config.username.is_empty() {
            return Err(FichaError::Config("username must not be empty".into()));
        }
        let url = self.auth_url(self.config.flavor.login_path());
        let body = json!({
            "username": self.config.username,
            "password": self.config.password,
        });

        debug!(url = %url, username = %self.config.username, "logging in to controller");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "controller rejected login");
            return Err(FichaError::Auth(AuthFailure::LoginRejected {
                status: status.as_u16(),
            }));
        }

        let headers = response.headers();
        let Some(cookie) = cookie_header(
            headers
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        ) else {
            warn!(status = status.as_u16(), "login succeeded without a session cookie");
            return Err(FichaError::Auth(AuthFailure::LoginRejected {
                status: status.as_u16(),
            }));
        };
        let csrf_token = header_string(headers, CSRF_HEADER);

        self.session.establish(cookie, csrf_token);
        info!(
            controller = %self.session.base_url(),
            site = %self.session.site(),
            "logged in to controller"
        );
        Ok(())
    }

    /// Log out and forget the session cookie.
    ///
    /// Does nothing when not logged in, or when the cookie was supplied by the
    /// caller. Local state is cleared even if the logout request fails.
    pub async fn logout(&mut self) -> Result<()> {
        if !self.session.is_logged_in() {
            return Ok(());
        }
        if !self.session.owns_cookie() {
            debug!("session cookie belongs to the caller, skipping logout");
            return Ok(());
        }

        let url = self.auth_url(self.config.flavor.logout_path());
        let mut builder = match self.config.flavor {
            ControllerFlavor::Classic => self.http.get(&url),
            ControllerFlavor::UnifiOs => self.http.post(&url),
        };
        if let Some(cookie) = self.session.cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(token) = self.session.csrf_token() {
            builder = builder.header(CSRF_HEADER, token);
        }

        let result = builder.send().await;
        self.session.clear();

        match result {
            Ok(response) if response.status().is_success() => {
                info!("logged out of controller");
                Ok(())
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "logout returned non-success status");
                Ok(())
            }
            Err(e) => Err(transport_error(&url, e)),
        }
    }

    /// End of the client's life: log out if this client owns the session.
    pub async fn close(mut self) -> Result<()> {
        self.logout().await
    }

    /// Send an authenticated request and return the envelope payload.
    ///
    /// ## Errors
    ///
    /// - [`FichaError::NotAuthenticated`] if no login has succeeded (no
    ///   request is sent)
    /// - [`FichaError::Auth`] if the session expired and one reauthentication
    ///   plus replay did not recover it
    /// - [`FichaError::Api`] if the controller answered `rc == "error"`
    /// - [`FichaError::Transport`] for connection failures (never retried)
    pub async fn execute(&mut self, request: &ApiRequest) -> Result<Value> {
        if !self.session.is_logged_in() {
            return Err(FichaError::NotAuthenticated);
        }

        let response = self.send(request).await?;
        if !response.is_login_required() {
            return parse_envelope(&response.body);
        }

        warn!(path = %request.path(), "controller session expired, logging in again");
        self.session.invalidate();
        if let Err(e) = self.login().await {
            warn!(error = %e, "reauthentication failed");
            return Err(FichaError::Auth(AuthFailure::SessionExpired));
        }

        let replay = self.send(request).await?;
        if replay.is_login_required() {
            warn!(path = %request.path(), "session still expired after reauthentication");
            return Err(FichaError::Auth(AuthFailure::SessionExpired));
        }
        parse_envelope(&replay.body)
    }

    async fn send(&mut self, request: &ApiRequest) -> Result<RawResponse> {
        let url = self.api_url(request.path());
        let method = request.effective_method();

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(cookie) = self.session.cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(token) = self.session.csrf_token() {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(payload) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload.to_string());
        }

        let response = builder.send().await.map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        if let Some(token) = header_string(response.headers(), UPDATED_CSRF_HEADER) {
            self.session.update_csrf_token(token);
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?
            .to_vec();

        debug!(method = %method, path = %request.path(), status = status.as_u16(), "controller request");
        Ok(RawResponse { status, body })
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if self.session.is_logged_in() && self.session.owns_cookie() {
            warn!("controller client dropped without logout; session left open on the controller");
        }
    }
}

fn build_http_client(config: &ControllerConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("ficha/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .connect_timeout(config.timeout)
        .danger_accept_invalid_certs(!config.verify_tls)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| FichaError::Transport(format!("HTTP client error: {}", e)))
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn transport_error(url: &str, e: reqwest::Error) -> FichaError {
    FichaError::Transport(format!("{}: {}", url, e))
}
