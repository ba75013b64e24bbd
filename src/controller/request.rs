//! Controller API requests.

use reqwest::Method;
use serde_json::Value;

/// One call against the controller's `/api/...` surface.
///
/// The method defaults to POST when a payload is attached and GET otherwise;
/// PUT and DELETE must be asked for explicitly.
///
/// ## Example
///
/// ```
/// use ficha::controller::ApiRequest;
/// use reqwest::Method;
/// use serde_json::json;
///
/// let list = ApiRequest::new("/api/self/sites");
/// assert_eq!(list.effective_method(), Method::GET);
///
/// let cmd = ApiRequest::new("/api/s/default/cmd/hotspot").payload(json!({"cmd": "x"}));
/// assert_eq!(cmd.effective_method(), Method::POST);
///
/// let update = ApiRequest::new("/api/s/default/rest/user/1")
///     .payload(json!({"note": "vip"}))
///     .method(Method::PUT);
/// assert_eq!(update.effective_method(), Method::PUT);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    path: String,
    method: Option<Method>,
    payload: Option<Value>,
}

impl ApiRequest {
    /// Create a request for `path` (relative to the base URL, starting with `/`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            payload: None,
        }
    }

    /// Attach a JSON payload.
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Force a specific HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// The HTTP method this request will be sent with.
    pub fn effective_method(&self) -> Method {
        match (&self.method, &self.payload) {
            (Some(method), _) => method.clone(),
            (None, Some(_)) => Method::POST,
            (None, None) => Method::GET,
        }
    }
}
