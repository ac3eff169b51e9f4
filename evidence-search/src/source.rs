//! Trait definition for pluggable literature sources.
//!
//! Each backend search endpoint (PubMed, Europe PMC) implements
//! [`LiteratureSource`] to provide a uniform interface for querying and
//! normalising results.

use crate::error::SearchError;
use crate::types::{Article, SearchFilters, Source};

/// A pluggable literature source.
///
/// Implementors issue one request per search and return the backend's
/// normalised article records. Each source handles its own:
///
/// - Endpoint selection
/// - Request body construction from the query and filters
/// - Mapping of non-success responses to [`SearchError::Backend`]
/// - Tolerance of missing or partially malformed `articles` arrays
///
/// All implementations must be `Send + Sync` for concurrent queries.
pub trait LiteratureSource: Send + Sync {
    /// Search this source and return its article records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the backend answers
    /// with a non-success status, or a success body is not JSON.
    fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, SearchError>> + Send;

    /// Returns which [`Source`] variant this implementation represents.
    fn source(&self) -> Source;
}
