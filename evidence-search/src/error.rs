//! Error types for the evidence-search crate.
//!
//! Backend failures keep the structured payload the server sent back so
//! callers can decide whether to offer a retry. No query text appears in
//! error messages.

use serde_json::Value;

/// A non-2xx response from the literature backend.
///
/// Carries the HTTP status and the parsed JSON error body. A body that is
/// missing or not valid JSON is recorded as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendError {
    /// The backend's `error` string, or `Backend error: <status>`.
    pub message: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// Whether the backend considers the request worth retrying.
    pub retryable: bool,
    /// The raw error body as returned by the backend.
    pub payload: Value,
}

impl BackendError {
    /// Build a backend error from an HTTP status and the raw response body.
    ///
    /// `retryable` follows the payload's `retryable` flag when it is a
    /// boolean; otherwise rate limits (429) and server errors (5xx) are
    /// treated as retryable.
    pub fn from_response(status: u16, body: &str) -> Self {
        let payload = match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => value,
            _ => Value::Object(serde_json::Map::new()),
        };

        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(|| format!("Backend error: {status}"), String::from);

        let retryable = payload
            .get("retryable")
            .and_then(Value::as_bool)
            .unwrap_or(status >= 500 || status == 429);

        Self {
            message,
            status,
            retryable,
            payload,
        }
    }
}

/// Errors that can occur during a literature search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The backend answered with a non-success status.
    #[error("backend error (HTTP {}): {}", .0.status, .0.message)]
    Backend(BackendError),

    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A source did not answer within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// A success response whose body was not JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration, filter value or source name.
    #[error("config error: {0}")]
    Config(String),

    /// The query was empty or whitespace only.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl SearchError {
    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend(err) => err.retryable,
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Parse(_) | Self::Config(_) | Self::InvalidQuery(_) => false,
        }
    }

    /// HTTP status of a backend failure, if this is one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Backend(err) => Some(err.status),
            _ => None,
        }
    }

    /// Map a transport-level [`reqwest::Error`] into a search error.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Convenience type alias for evidence-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
