//! Error types for the medevidence client.

use evidence_search::{BackendError, SearchError};

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file or value error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Literature search or backend call error.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        Self::Search(SearchError::Backend(err))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
