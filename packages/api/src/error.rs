use serde_json::Value;
use thiserror::Error;

use store::StoreError;

/// Failures of a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (network down, CORS, DNS).
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response carrying `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    /// 401, or a call that needs a session made without one.
    #[error("not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Local(#[from] StoreError),
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Best human-readable message in an error body: `message`, then `error`,
/// then a bare string body.
pub(crate) fn body_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
