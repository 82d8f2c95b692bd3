use std::time::Duration;

use thiserror::Error;

/// Failure modes of a remote call, before they are absorbed into a result
/// envelope.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response carried no data")]
    MissingData,
    #[error("service rejected the request: {0}")]
    Rejected(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl RemoteError {
    /// Build a server error from a non-2xx response body, preferring the
    /// body's `{error}` message over the raw text.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "empty response body".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        Self::Server { status, message }
    }
}
