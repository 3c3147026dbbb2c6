//! HTTP-shaped request and response records.
//!
//! The gateway is framework-agnostic: callers hand it a method, a path, and
//! an optional body, and get back a status code, headers, and a JSON body.
//! Routing plumbing stays outside this crate.

use serde::Serialize;

/// Incoming request seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method, case-insensitive.
    pub method: String,
    /// Request path, e.g. `/tasks` or `/tasks/{id}`.
    pub path: String,
    /// Raw request body, when present.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a body-less request.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Attaches a raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Outgoing response produced by the gateway.
///
/// Every response, success or failure, carries the permissive CORS header
/// set and a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// JSON-encoded body.
    pub body: String,
}

impl ApiResponse {
    /// Builds a CORS-enabled JSON response from a serializable payload.
    #[must_use]
    pub fn json(status: u16, payload: &impl Serialize) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|_| {
            serde_json::json!({"error": "response serialization failed"}).to_string()
        });
        Self {
            status,
            headers: cors_headers(),
            body,
        }
    }

    /// Returns the first header value with the given name, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The permissive CORS header set attached to every response.
fn cors_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_owned(), "application/json".to_owned()),
        ("Access-Control-Allow-Origin".to_owned(), "*".to_owned()),
        (
            "Access-Control-Allow-Methods".to_owned(),
            "GET,POST,OPTIONS".to_owned(),
        ),
        (
            "Access-Control-Allow-Headers".to_owned(),
            "Content-Type,X-Request-Date,Authorization,X-Api-Key".to_owned(),
        ),
    ]
}
