//! # evidence-search
//!
//! Multi-source medical literature search for clinical question answering.
//!
//! A query is sent concurrently to the backend's PubMed and Europe PMC
//! search endpoints. The merged records are deduplicated, scored for
//! relevance to the query, graded for strength of evidence, and ranked.
//!
//! ## Design
//!
//! - One concurrent request per source, each bounded by a timeout
//! - A failing source is logged and skipped; it never fails the search
//! - Deduplication by PMID, then DOI, then normalised title
//! - Heuristic relevance (0 to 100) with a hard cutoff at 15
//! - Composite ranking of relevance, study design and recency, top 20
//! - In-memory cache with configurable TTL
//!
//! ## Privacy
//!
//! - Queries are logged only at trace level
//! - Nothing is persisted

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

pub use config::SearchConfig;
pub use error::{BackendError, Result, SearchError};
pub use orchestrator::search::{AggregatedSearch, PipelineStats, SourceFailure, SourceOutcome};
pub use source::LiteratureSource;
pub use types::{
    Article, DateRange, EvidenceStrength, QualityTag, ScoredArticle, SearchFilters, Source,
    StudyType, StudyTypeFilter,
};

fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidQuery("query must not be empty".into()));
    }
    Ok(())
}

/// Search every configured source and return the ranked articles.
///
/// Results are merged, deduplicated, scored, graded, filtered at a
/// relevance of 15, sorted by composite score and truncated to
/// `config.max_results`. Repeated identical searches are served from the
/// cache while it is enabled.
///
/// An empty result is not an error: it is what comes back when nothing
/// relevant was found or when every source failed.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration and
/// [`SearchError::InvalidQuery`] for an empty query. Individual source
/// failures are logged and do not cause an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> evidence_search::Result<()> {
/// let config = evidence_search::SearchConfig::default();
/// let filters = evidence_search::SearchFilters::default();
/// let query = "sglt2 inhibitors heart failure";
/// let articles = evidence_search::search_multiple_sources(query, &filters, &config).await?;
/// for a in &articles {
///     println!("[{}] {}", a.relevance_score, a.article.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_multiple_sources(
    query: &str,
    filters: &SearchFilters,
    config: &SearchConfig,
) -> Result<Vec<ScoredArticle>> {
    config.validate()?;
    validate_query(query)?;

    let key = cache::CacheKey::new(query, filters, config);
    if let Some(cached) = cache::get(&key, config.cache_ttl_seconds).await {
        tracing::debug!(count = cached.len(), "serving search from cache");
        return Ok(cached);
    }

    let result = orchestrator::search::orchestrate_search(query, filters, config).await?;
    if result.is_complete() {
        cache::insert(key, result.articles.clone(), config.cache_ttl_seconds).await;
    }
    Ok(result.articles)
}

/// Like [`search_multiple_sources`] but bypasses the cache and also returns
/// per-source failures and pipeline counts.
///
/// # Errors
///
/// Same as [`search_multiple_sources`].
pub async fn search_with_report(
    query: &str,
    filters: &SearchFilters,
    config: &SearchConfig,
) -> Result<AggregatedSearch> {
    config.validate()?;
    validate_query(query)?;
    orchestrator::search::orchestrate_search(query, filters, config).await
}
