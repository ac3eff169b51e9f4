//! Literature source implementations.
//!
//! Each module provides a struct implementing [`crate::source::LiteratureSource`]
//! for one backend search endpoint. The request/response contract is the
//! same for every endpoint and lives here.

pub mod europepmc;
pub mod pubmed;

pub use europepmc::EuropePmcSource;
pub use pubmed::PubMedSource;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BackendError, SearchError};
use crate::types::{Article, SearchFilters, Source};

/// Request body shared by all search endpoints.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    filters: &'a SearchFilters,
}

/// POST `{query, filters}` to a search endpoint and decode its articles.
pub(crate) async fn post_search(
    client: &reqwest::Client,
    url: &str,
    source: Source,
    query: &str,
    filters: &SearchFilters,
) -> Result<Vec<Article>, SearchError> {
    tracing::trace!(%source, query, "sending search request");

    let response = client
        .post(url)
        .json(&SearchRequest { query, filters })
        .send()
        .await
        .map_err(|e| SearchError::from_transport(&e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SearchError::from_transport(&e))?;

    if !status.is_success() {
        let err = BackendError::from_response(status.as_u16(), &body);
        tracing::debug!(
            %source,
            status = err.status,
            retryable = err.retryable,
            "backend rejected search"
        );
        return Err(SearchError::Backend(err));
    }

    parse_articles(&body, source)
}

/// Decode the `articles` array of a success body.
///
/// A missing or non-array `articles` field yields an empty list. Entries
/// that do not decode as an [`Article`] are skipped. Articles without a
/// `source` are stamped with the name of the source that returned them.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] only when the body is not JSON at all.
pub fn parse_articles(body: &str, source: Source) -> Result<Vec<Article>, SearchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("{source} response is not JSON: {e}")))?;

    let Some(entries) = value.get("articles").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut skipped = 0usize;
    let articles: Vec<Article> = entries
        .iter()
        .filter_map(|entry| match Article::deserialize(entry) {
            Ok(mut article) => {
                if article.source.as_deref().is_none_or(str::is_empty) {
                    article.source = Some(source.name().to_string());
                }
                Some(article)
            }
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(%source, skipped, "skipped malformed article records");
    }

    Ok(articles)
}
