//! Backend call failures.

use thiserror::Error;

/// Failure of a single backend call. Never surfaced to end users directly;
/// the generator maps each kind to a fixed reply.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-2xx HTTP status.
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Transport-level failure (refused, reset, DNS).
    #[error("cannot connect to backend: {0}")]
    Connection(String),

    /// Call exceeded its fixed timeout.
    #[error("backend request timed out")]
    Timeout,

    /// Body was not the expected JSON shape.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// Anything else.
    #[error("backend request failed: {0}")]
    Other(String),
}

impl BackendError {
    /// Short machine-readable kind for structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http_status",
            Self::Connection(_) => "connection",
            Self::Timeout => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Other(_) => "other",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connection(error.to_string())
        } else if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else {
            Self::Other(error.to_string())
        }
    }
}
