// veilmail-cli/src/output.rs
use serde::Serialize;
use std::fmt;
use veilmail_client::{ApiError, ErrorKind};

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pii_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

impl ErrorResponse {
    fn plain(type_: &'static str, message: String, retryable: bool) -> Self {
        Self {
            type_,
            message,
            code: None,
            status: None,
            pii_types: None,
            retryable: Some(retryable),
            retry_after: None,
        }
    }

    pub fn signature_rejected(message: String) -> Self {
        Self::plain("signature_rejected", message, false)
    }

    /// Local failures: bad input, config, IO
    pub fn internal(message: String) -> Self {
        Self::plain("internal_error", message, false)
    }

    pub fn from_api(err: &ApiError) -> Self {
        let type_ = match err.kind {
            ErrorKind::Authentication => "authentication_failed",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation_failed",
            ErrorKind::PiiDetected { .. } => "pii_detected",
            ErrorKind::RateLimit { .. } => "rate_limited",
            ErrorKind::Server => "server_error",
            ErrorKind::Generic => "api_error",
            ErrorKind::Network => "network_error",
        };

        Self {
            type_,
            message: err.message.clone(),
            code: err.code.clone(),
            status: err.status,
            pii_types: err.pii_types().map(<[String]>::to_vec),
            retryable: Some(err.is_transient()),
            retry_after: err.retry_after(),
        }
    }
}

/// Exit codes for agent decision making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    TransientError = 1,
    PermanentError = 2,
    SignatureRejected = 3,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TransientError => write!(f, "transient_error"),
            Self::PermanentError => write!(f, "permanent_error"),
            Self::SignatureRejected => write!(f, "signature_rejected"),
        }
    }
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn for_api_error(err: &ApiError) -> Self {
        if err.is_transient() {
            Self::TransientError
        } else {
            Self::PermanentError
        }
    }
}

// Print response to stdout
pub fn print_response<T: Serialize>(resp: &Response<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Warning:").yellow(), message));
}
