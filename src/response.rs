//! Standard response envelope helpers.
//!
//! Every response body is a single JSON object with one or more named top-level keys,
//! e.g. `{"movie": {...}}` or `{"error": "..."}`.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key`, serializing `value`. Fails only if `value` has no JSON representation.
    pub fn with<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Result<Self, serde_json::Error> {
        self.0.insert(key.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

/// Tab-indented JSON followed by a single newline.
pub fn encode(data: &Envelope) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    data.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Build a JSON response. `headers` are applied first; `Content-Type` is always `application/json`.
pub fn write_json(status: StatusCode, data: &Envelope, headers: HeaderMap) -> Result<Response, serde_json::Error> {
    let body = encode(data)?;
    let mut resp = Response::new(Body::from(body));
    *resp.status_mut() = status;
    resp.headers_mut().extend(headers);
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(resp)
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: Value) -> Response {
    let mut env = Envelope::new();
    env.insert("error", message);
    match write_json(status, &env, HeaderMap::new()) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode error response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
