//! Mock controller shared by the integration tests.
//!
//! Speaks just enough of the controller API for the client: login/logout for
//! both flavors, `cmd/hotspot`, `stat/voucher`, `self/sites`, `rest/user` and
//! `stat/sysinfo`. Counters and switches on [`Mock`] let tests script session
//! expiry and errors.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use ficha::controller::{Client, ControllerConfig, ControllerFlavor, LOGIN_REQUIRED};

/// Cookie a test can hand to `Client::with_cookie`; always accepted.
pub const EXTERNAL_COOKIE: &str = "unifises=external";

/// First code handed out by `create-voucher`.
pub const FIRST_CODE: &str = "ABCDE12345";

pub const FIRST_CREATE_TIME: i64 = 1_700_000_000;

#[derive(Default)]
pub struct Mock {
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
    /// API requests (everything except login/logout), including rejected ones
    pub requests: AtomicUsize,
    /// Answer the next N API requests with 401 LoginRequired
    pub expire_next: AtomicUsize,
    /// Non-zero: login answers with this status
    pub login_status: AtomicU16,
    /// Non-zero: only the first N logins succeed, later ones get 400
    pub logins_allowed: AtomicUsize,
    /// `stat/voucher` returns nothing
    pub empty_stat: AtomicBool,
    /// `cmd/hotspot` answers `rc: error` with this message
    pub fail_with: Mutex<Option<String>>,
    pub vouchers: Mutex<Vec<Value>>,
    pub last_payload: Mutex<Option<Value>>,
    pub last_csrf: Mutex<Option<String>>,
    /// Method and body of the last `rest/user` call
    pub last_rest: Mutex<Option<(String, Option<Value>)>>,
}

impl Mock {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn current_cookie(&self) -> String {
        format!("unifises=session-{}", self.logins.load(Ordering::SeqCst))
    }

    /// Count the request and check its cookie. `Err` is the 401 to send back.
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last_csrf.lock().unwrap() = headers
            .get("x-csrf-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let expired = self
            .expire_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let valid = cookie == EXTERNAL_COOKIE
            || (self.logins.load(Ordering::SeqCst) > 0 && cookie == self.current_cookie());

        if expired || !valid {
            return Err(login_required());
        }
        Ok(())
    }
}

fn ok(data: Value) -> Response {
    Json(json!({ "meta": { "rc": "ok" }, "data": data })).into_response()
}

fn api_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "meta": { "rc": "error", "msg": msg }, "data": [] }))).into_response()
}

fn login_required() -> Response {
    api_error(StatusCode::UNAUTHORIZED, LOGIN_REQUIRED)
}

async fn login(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> Response {
    let status = mock.login_status.load(Ordering::SeqCst);
    if status != 0 {
        let status = StatusCode::from_u16(status).unwrap();
        return api_error(status, "api.err.Invalid");
    }
    if body["username"] != "admin" || body["password"] != "secret" {
        return api_error(StatusCode::BAD_REQUEST, "api.err.Invalid");
    }
    let allowed = mock.logins_allowed.load(Ordering::SeqCst);
    if allowed != 0 && mock.logins.load(Ordering::SeqCst) >= allowed {
        return api_error(StatusCode::BAD_REQUEST, "api.err.Invalid");
    }

    let n = mock.logins.fetch_add(1, Ordering::SeqCst) + 1;
    (
        [
            (
                header::SET_COOKIE,
                format!("unifises=session-{}; Path=/; HttpOnly", n),
            ),
            (HeaderName::from_static("x-csrf-token"), format!("tok-{}", n)),
        ],
        Json(json!({ "meta": { "rc": "ok" }, "data": [] })),
    )
        .into_response()
}

async fn logout(State(mock): State<Arc<Mock>>) -> Response {
    mock.logouts.fetch_add(1, Ordering::SeqCst);
    ok(json!([]))
}

async fn hotspot(
    State(mock): State<Arc<Mock>>,
    Path(_site): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = mock.authorize(&headers) {
        return resp;
    }
    *mock.last_payload.lock().unwrap() = Some(body.clone());
    if let Some(msg) = mock.fail_with.lock().unwrap().clone() {
        return api_error(StatusCode::BAD_REQUEST, &msg);
    }

    match body["cmd"].as_str() {
        Some("create-voucher") => {
            let mut vouchers = mock.vouchers.lock().unwrap();
            let n = vouchers.len() as i64;
            let create_time = FIRST_CREATE_TIME + n;
            let code = if n == 0 {
                FIRST_CODE.to_string()
            } else {
                format!("{:010}", n)
            };
            vouchers.push(json!({
                "_id": format!("v{}", n + 1),
                "code": code,
                "create_time": create_time,
                "duration": body["expire"],
                "quota": body["quota"],
                "used": 0,
                "note": body.get("note").cloned().unwrap_or(Value::Null),
            }));
            ok(json!([{ "create_time": create_time }]))
        }
        Some("delete-voucher") => {
            let id = body["_id"].clone();
            mock.vouchers.lock().unwrap().retain(|v| v["_id"] != id);
            ok(json!([]))
        }
        _ => api_error(StatusCode::BAD_REQUEST, "api.err.UnknownCommand"),
    }
}

async fn stat_voucher(
    State(mock): State<Arc<Mock>>,
    Path(_site): Path<String>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Response {
    if let Err(resp) = mock.authorize(&headers) {
        return resp;
    }
    if mock.empty_stat.load(Ordering::SeqCst) {
        return ok(json!([]));
    }

    let filter = body.and_then(|Json(b)| b.get("create_time").and_then(Value::as_i64));
    let vouchers: Vec<Value> = mock
        .vouchers
        .lock()
        .unwrap()
        .iter()
        .filter(|v| filter.is_none_or(|t| v["create_time"] == t))
        .cloned()
        .collect();

    let mut resp = ok(Value::Array(vouchers));
    resp.headers_mut()
        .insert("x-updated-csrf-token", "tok-rotated".parse().unwrap());
    resp
}

async fn sites(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if let Err(resp) = mock.authorize(&headers) {
        return resp;
    }
    ok(json!([
        { "_id": "s1", "name": "default", "desc": "Default" },
        { "_id": "s2", "name": "lobby", "desc": "Lobby" }
    ]))
}

async fn sysinfo(
    State(mock): State<Arc<Mock>>,
    Path(_site): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = mock.authorize(&headers) {
        return resp;
    }
    ok(json!([{ "version": "8.0.26", "hostname": "unifi", "timezone": "UTC" }]))
}

async fn rest_user(
    State(mock): State<Arc<Mock>>,
    Path((_site, id)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Response {
    if let Err(resp) = mock.authorize(&headers) {
        return resp;
    }
    *mock.last_rest.lock().unwrap() = Some((method.to_string(), body.map(|Json(b)| b)));
    ok(json!([{ "_id": id }]))
}

fn api_routes() -> Router<Arc<Mock>> {
    Router::new()
        .route("/api/s/:site/cmd/hotspot", post(hotspot))
        .route("/api/s/:site/stat/voucher", get(stat_voucher).post(stat_voucher))
        .route("/api/s/:site/stat/sysinfo", get(sysinfo))
        .route("/api/self/sites", get(sites))
        .route("/api/s/:site/rest/user/:id", put(rest_user).delete(rest_user))
}

/// Start a mock controller on an ephemeral port; returns its base URL.
pub async fn spawn(mock: Arc<Mock>) -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/logout", get(logout))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(api_routes())
        .nest("/proxy/network", api_routes())
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn config(base_url: &str) -> ControllerConfig {
    ControllerConfig::new(base_url, "admin", "secret")
}

pub fn unifi_os_config(base_url: &str) -> ControllerConfig {
    config(base_url).flavor(ControllerFlavor::UnifiOs)
}

/// A fresh mock plus a logged-in client for it.
pub async fn logged_in() -> (Arc<Mock>, Client) {
    let mock = Arc::new(Mock::default());
    let url = spawn(mock.clone()).await;
    let mut client = Client::new(config(&url)).unwrap();
    client.login().await.unwrap();
    (mock, client)
}
