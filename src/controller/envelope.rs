//! # Response Envelope
//!
//! Every controller reply is wrapped the same way:
//!
//! ```text
//! { "meta": { "rc": "ok" | "error", "msg": "..." }, "data": [ ... ] }
//! ```
//!
//! On `rc == "ok"` the `data` array is the payload. On `rc == "error"` the
//! `msg` field (when present) says why, and `data` is ignored.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FichaError, Result};

/// Message the controller sends with a 401 once the session cookie expired.
pub const LOGIN_REQUIRED: &str = "api.err.LoginRequired";

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub meta: Meta,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Decode an envelope and return its `data` payload.
///
/// ## Example
///
/// ```
/// use ficha::controller::parse_envelope;
/// use serde_json::json;
///
/// let data = parse_envelope(br#"{"meta":{"rc":"ok"},"data":[{"a":1}]}"#).unwrap();
/// assert_eq!(data, json!([{"a": 1}]));
///
/// let err = parse_envelope(br#"{"meta":{"rc":"error","msg":"x"}}"#).unwrap_err();
/// assert_eq!(err.to_string(), "Controller error: x");
/// ```
pub fn parse_envelope(body: &[u8]) -> Result<Value> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| FichaError::Decode(format!("malformed controller response: {}", e)))?;

    match envelope.meta.rc.as_str() {
        "ok" => Ok(envelope.data.unwrap_or_else(|| Value::Array(Vec::new()))),
        "error" => Err(FichaError::Api(envelope.meta.msg.unwrap_or_default())),
        other => Err(FichaError::Api(format!("unexpected response code '{}'", other))),
    }
}

/// True if `body` is the controller's "login required" error envelope.
pub fn is_login_required(body: &[u8]) -> bool {
    serde_json::from_slice::<Envelope>(body).is_ok_and(|envelope| {
        envelope.meta.rc == "error" && envelope.meta.msg.as_deref() == Some(LOGIN_REQUIRED)
    })
}

/// Deserialize an ok payload into typed records.
pub fn decode_records<T: DeserializeOwned>(data: Value) -> Result<Vec<T>> {
    match data {
        Value::Array(_) => serde_json::from_value(data)
            .map_err(|e| FichaError::Decode(format!("unexpected record shape: {}", e))),
        Value::Null => Ok(Vec::new()),
        single => serde_json::from_value(single)
            .map(|record| vec![record])
            .map_err(|e| FichaError::Decode(format!("unexpected record shape: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_ok_returns_data_verbatim() {
        let body = br#"{"meta":{"rc":"ok"},"data":[{"code":"0123456789","nested":{"x":[1,2]}}]}"#;
        let data = parse_envelope(body).unwrap();
        assert_eq!(data, json!([{"code": "0123456789", "nested": {"x": [1, 2]}}]));
    }

    #[test]
    fn test_ok_without_data_is_empty() {
        let data = parse_envelope(br#"{"meta":{"rc":"ok"}}"#).unwrap();
        assert_eq!(data, json!([]));
    }

    #[test]
    fn test_error_carries_message() {
        match parse_envelope(br#"{"meta":{"rc":"error","msg":"x"},"data":[1]}"#) {
            Err(FichaError::Api(msg)) => assert_eq!(msg, "x"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_without_message() {
        match parse_envelope(br#"{"meta":{"rc":"error"}}"#) {
            Err(FichaError::Api(msg)) => assert_eq!(msg, ""),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_rc() {
        assert!(matches!(
            parse_envelope(br#"{"meta":{"rc":"maybe"}}"#),
            Err(FichaError::Api(_))
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_envelope(b"<html>502 Bad Gateway</html>"),
            Err(FichaError::Decode(_))
        ));
    }

    #[test]
    fn test_login_required_detection() {
        assert!(is_login_required(
            br#"{"meta":{"rc":"error","msg":"api.err.LoginRequired"},"data":[]}"#
        ));
        assert!(!is_login_required(
            br#"{"meta":{"rc":"error","msg":"api.err.NoPermission"},"data":[]}"#
        ));
        assert!(!is_login_required(b"Unauthorized"));
    }

    #[test]
    fn test_decode_records() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Row {
            name: String,
        }

        let rows: Vec<Row> = decode_records(json!([{"name": "a"}, {"name": "b"}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "b");

        let rows: Vec<Row> = decode_records(json!({"name": "solo"})).unwrap();
        assert_eq!(rows, vec![Row { name: "solo".into() }]);

        let rows: Vec<Row> = decode_records(Value::Null).unwrap();
        assert!(rows.is_empty());
    }
}
