//! PubMed search through the backend's `/search-pubmed` endpoint.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::LiteratureSource;
use crate::types::{Article, SearchFilters, Source};

/// PubMed adapter.
///
/// Primary source: MEDLINE-indexed abstracts with publication types, so
/// most records arrive with a study type already assigned.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: reqwest::Client,
    url: String,
}

impl PubMedSource {
    /// Create an adapter that posts to `{base_url}/search-pubmed`.
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            url: config.endpoint_url(Source::PubMed.endpoint()),
        }
    }
}

impl LiteratureSource for PubMedSource {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<Article>, SearchError> {
        super::post_search(&self.client, &self.url, Source::PubMed, query, filters).await
    }

    fn source(&self) -> Source {
        Source::PubMed
    }
}
