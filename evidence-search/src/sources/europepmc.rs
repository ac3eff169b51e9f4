//! Europe PMC search through the backend's `/search-europepmc` endpoint.
//!
//! Europe PMC indexes PubMed plus preprints and open-access full text, so
//! it overlaps heavily with PubMed; duplicates are removed downstream.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::LiteratureSource;
use crate::types::{Article, SearchFilters, Source};

/// Europe PMC adapter.
#[derive(Debug, Clone)]
pub struct EuropePmcSource {
    client: reqwest::Client,
    url: String,
}

impl EuropePmcSource {
    /// Create an adapter that posts to `{base_url}/search-europepmc`.
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            url: config.endpoint_url(Source::EuropePmc.endpoint()),
        }
    }
}

impl LiteratureSource for EuropePmcSource {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<Article>, SearchError> {
        super::post_search(&self.client, &self.url, Source::EuropePmc, query, filters).await
    }

    fn source(&self) -> Source {
        Source::EuropePmc
    }
}
