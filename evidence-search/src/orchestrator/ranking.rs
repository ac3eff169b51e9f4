//! Relevance cutoff and composite ranking.
//!
//! ```text
//! composite = relevance_score + study_type_weight + recency_weight
//! ```
//!
//! Articles below [`MIN_RELEVANCE_SCORE`] are removed before sorting. The
//! sort is stable, so equal composites keep their merge order.

use crate::types::{ScoredArticle, StudyType};

/// Articles scoring below this are dropped entirely.
pub const MIN_RELEVANCE_SCORE: u8 = 15;

/// Upper bound on the number of ranked articles returned.
pub const MAX_RESULTS: usize = 20;

/// Ranking weight of a study design.
pub fn study_type_weight(study_type: Option<&StudyType>) -> u32 {
    match study_type {
        Some(StudyType::MetaAnalysis) => 40,
        Some(StudyType::SystematicReview) => 35,
        Some(StudyType::Rct) => 30,
        Some(StudyType::ClinicalTrial) => 25,
        Some(StudyType::Review) => 20,
        _ => 15,
    }
}

/// 10 for backend-flagged recent work, 5 for the last three years, else 0.
pub fn recency_weight(is_recent: bool, publication_year: Option<i32>, current_year: i32) -> u32 {
    if is_recent {
        10
    } else if publication_year.is_some_and(|y| y >= current_year - 3) {
        5
    } else {
        0
    }
}

/// Composite ranking score of a scored article.
pub fn composite_score(scored: &ScoredArticle, current_year: i32) -> u32 {
    let article = &scored.article;
    u32::from(scored.relevance_score)
        + study_type_weight(article.study_type.as_ref())
        + recency_weight(article.is_recent, article.publication_year, current_year)
}

/// Drop low-relevance articles, sort by composite score (descending) and
/// keep at most `max_results`, itself capped at [`MAX_RESULTS`].
pub fn rank(
    articles: Vec<ScoredArticle>,
    current_year: i32,
    max_results: usize,
) -> Vec<ScoredArticle> {
    let mut ranked: Vec<(u32, ScoredArticle)> = articles
        .into_iter()
        .filter(|a| a.relevance_score >= MIN_RELEVANCE_SCORE)
        .map(|a| (composite_score(&a, current_year), a))
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.truncate(max_results.min(MAX_RESULTS));
    ranked.into_iter().map(|(_, a)| a).collect()
}
