//! Wire formatting helpers: the `{code, type, message}` envelope used for
//! non-entity responses and pretty-printed entity bodies.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

/// Uniform wrapper for success and error responses that carry no entity body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl Envelope {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            kind: "unknown".to_string(),
            message: message.into(),
        }
    }
}

/// Pretty-print with a trailing newline, the body shape every response uses.
fn render<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value).map(|mut body| {
        body.push('\n');
        body
    })
}

/// 200 envelope response with the given message.
pub fn success(message: impl Into<String>) -> Response {
    envelope(StatusCode::OK, message)
}

/// Envelope response with an explicit status code.
pub fn envelope(code: StatusCode, message: impl Into<String>) -> Response {
    let envelope = Envelope::new(code, message);
    let body = render(&envelope).unwrap_or_else(|e| {
        tracing::error!("envelope serialization failed: {e}");
        String::new()
    });
    (code, [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response()
}

/// 200 response carrying the serialized entity itself, newline-terminated.
/// Serialization failures surface as a 400 envelope like any other
/// pre-response error.
pub fn entity<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = render(value).map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response())
}
