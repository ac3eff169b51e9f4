//! In-memory cache of ranked search results.
//!
//! Keyed by everything that shapes a ranking: backend, exact query text,
//! filters, source set and result limit. Uses [`moka`] for async-friendly
//! caching with TTL expiry and bounded size. Only searches in which every
//! source answered are stored, so a transient outage is not replayed from
//! cache.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::config::SearchConfig;
use crate::orchestrator::search::requested_sources;
use crate::types::{ScoredArticle, SearchFilters, Source};

/// Maximum number of cached result lists.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Process-wide cache, created on first use with the TTL of that call.
static CACHE: OnceLock<Cache<CacheKey, Vec<ScoredArticle>>> = OnceLock::new();

/// Identity of a search for caching purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    base_url: String,
    /// Query exactly as given. Edge whitespace changes the relevance score.
    query: String,
    filters: SearchFilters,
    /// Deduplicated sources in merge order, so request order does not matter.
    sources: Vec<Source>,
    max_results: usize,
}

impl CacheKey {
    pub fn new(query: &str, filters: &SearchFilters, config: &SearchConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query: query.to_string(),
            filters: *filters,
            sources: requested_sources(&config.sources),
            max_results: config.max_results,
        }
    }
}

/// The TTL only takes effect on the first call in the process.
fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, Vec<ScoredArticle>> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up a cached ranking. Always misses when `ttl_seconds` is 0.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<Vec<ScoredArticle>> {
    if ttl_seconds == 0 {
        return None;
    }
    get_or_init_cache(ttl_seconds).get(key).await
}

/// Store a ranking. Does nothing when `ttl_seconds` is 0.
pub async fn insert(key: CacheKey, articles: Vec<ScoredArticle>, ttl_seconds: u64) {
    if ttl_seconds == 0 {
        return;
    }
    get_or_init_cache(ttl_seconds).insert(key, articles).await;
}
