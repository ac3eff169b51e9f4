//! Shared HTTP client for backend requests.
//!
//! One [`reqwest::Client`] is built per search and cloned into each source,
//! so all sources share a connection pool.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent to the backend.
const USER_AGENT: &str = concat!("evidence-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for backend requests.
///
/// The client has:
/// - Per-request timeout from config
/// - A fixed crate User-Agent
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
