//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which backend is called, which sources are
//! queried, timeouts, caching and the size of the ranked result set.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;
use crate::orchestrator::ranking::MAX_RESULTS;
use crate::types::Source;

/// Configuration for a multi-source literature search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the literature backend, e.g. `http://localhost:3001`.
    pub base_url: String,
    /// Which sources to query. Queried concurrently; results are merged.
    pub sources: Vec<Source>,
    /// Maximum number of ranked articles to return (1 to 20).
    pub max_results: usize,
    /// Per-source timeout in seconds.
    pub timeout_seconds: u64,
    /// How long to cache ranked results in seconds. Set to 0 to disable caching.
    ///
    /// The cache is process-wide and takes its TTL from the first search
    /// that uses it; later non-zero values only switch caching on, they do
    /// not change the expiry.
    pub cache_ttl_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".into(),
            sources: Source::all().to_vec(),
            max_results: MAX_RESULTS,
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an http(s) URL
    /// - `sources` must not be empty
    /// - `max_results` must be between 1 and 20
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS {
            return Err(SearchError::Config(format!(
                "max_results must be between 1 and {MAX_RESULTS}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Full URL for a backend path, tolerating a trailing slash on `base_url`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
