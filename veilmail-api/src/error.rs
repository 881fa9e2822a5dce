// veilmail-api/src/error.rs
use crate::http::HttpError;
use crate::payload::JsonObject;
use serde_json::Value;
use thiserror::Error;

/// What went wrong, with the extra data some kinds carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid API key (401)
    Authentication,
    /// Authenticated but not allowed (403)
    Forbidden,
    /// Unknown resource (404)
    NotFound,
    /// Malformed request (400)
    Validation,
    /// Content rejected because it contains personal data (422)
    PiiDetected { pii_types: Vec<String> },
    /// Quota exceeded (429)
    RateLimit { retry_after: Option<u64> },
    /// Remote fault (5xx)
    Server,
    /// Anything else, including unparseable error bodies
    Generic,
    /// No response at all: connect, DNS or timeout failure
    Network,
}

/// Error returned by every API call
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub code: Option<String>,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            status: None,
            details: None,
        }
    }

    pub fn network(err: &HttpError) -> Self {
        Self::new(ErrorKind::Network, format!("Network error: {err}"))
    }

    /// Error status whose body was not a JSON object
    pub fn http_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorKind::Generic, format!("HTTP error {status}"))
        }
    }

    /// Map an error status and its decoded body to exactly one kind.
    ///
    /// The body may carry its fields at the top level or under `error`.
    pub fn from_response(status: u16, body: &JsonObject) -> Self {
        let error = match body.get("error") {
            Some(Value::Object(inner)) => inner,
            _ => body,
        };

        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .map(String::from);
        let details = error.get("details").filter(|v| !v.is_null()).cloned();
        let pii_types = error.get("piiTypes").filter(|v| !v.is_null());

        let kind = match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            422 if code.as_deref() == Some("pii_detected") || pii_types.is_some() => {
                ErrorKind::PiiDetected {
                    pii_types: pii_types.map(string_list).unwrap_or_default(),
                }
            }
            429 => ErrorKind::RateLimit {
                retry_after: error.get("retryAfter").and_then(parse_seconds),
            },
            400 => ErrorKind::Validation,
            s if s >= 500 => ErrorKind::Server,
            _ => ErrorKind::Generic,
        };

        Self {
            kind,
            message,
            code,
            status: Some(status),
            details,
        }
    }

    pub fn pii_types(&self) -> Option<&[String]> {
        match &self.kind {
            ErrorKind::PiiDetected { pii_types } => Some(pii_types),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self.kind {
            ErrorKind::RateLimit { retry_after } => retry_after,
            _ => None,
        }
    }

    /// Whether repeating the same call later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Network | ErrorKind::RateLimit { .. } | ErrorKind::Server
        )
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// `retryAfter` may arrive as a number or a numeric string
fn parse_seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
