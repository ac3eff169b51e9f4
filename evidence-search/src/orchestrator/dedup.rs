//! Article deduplication by identifier.
//!
//! The key for an article is its PMID, else its DOI, else its lowercased
//! trimmed title. The first article seen for a key wins and the relative
//! order of survivors is preserved, so merge order (PubMed before
//! Europe PMC) decides which copy of a paper is kept.

use std::collections::HashSet;

use crate::types::Article;

/// Deduplication key for an article.
///
/// Empty identifiers are treated as absent.
pub fn dedup_key(article: &Article) -> String {
    if let Some(pmid) = article.pmid.as_deref().filter(|p| !p.is_empty()) {
        return pmid.to_string();
    }
    if let Some(doi) = article.doi.as_deref().filter(|d| !d.is_empty()) {
        return doi.to_string();
    }
    article.title.trim().to_lowercase()
}

/// Remove later articles whose [`dedup_key`] has already been seen.
pub fn deduplicate(articles: Vec<Article>) -> Vec<Article> {
    let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
    articles
        .into_iter()
        .filter(|article| seen.insert(dedup_key(article)))
        .collect()
}
