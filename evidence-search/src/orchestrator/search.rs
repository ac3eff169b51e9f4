//! Core search orchestrator: concurrent multi-source fan-out, dedup, score, rank.
//!
//! Every requested source is queried concurrently and each call is settled
//! into a [`SourceOutcome`]. A failed source contributes no articles and is
//! reported in [`AggregatedSearch::failures`]; it never fails the search.
//! The settled outcomes then go through a pure, synchronous pipeline.

use std::time::Duration;

use chrono::Datelike;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::build_client;
use crate::source::LiteratureSource;
use crate::sources::{EuropePmcSource, PubMedSource};
use crate::types::{Article, ScoredArticle, SearchFilters, Source};

use super::dedup::deduplicate;
use super::evidence::classify;
use super::ranking::{rank, MIN_RELEVANCE_SCORE};
use super::relevance::relevance_score;

/// The settled result of querying one source.
#[derive(Debug)]
pub enum SourceOutcome {
    Fulfilled {
        source: Source,
        articles: Vec<Article>,
    },
    Rejected {
        source: Source,
        error: SearchError,
    },
}

impl SourceOutcome {
    fn settle(source: Source, result: Result<Vec<Article>, SearchError>) -> Self {
        match result {
            Ok(articles) => Self::Fulfilled { source, articles },
            Err(error) => Self::Rejected { source, error },
        }
    }

    pub fn source(&self) -> Source {
        match self {
            Self::Fulfilled { source, .. } | Self::Rejected { source, .. } => *source,
        }
    }
}

/// A source that failed during a search.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: Source,
    pub error: SearchError,
}

/// Article counts at each pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Articles returned by all sources before deduplication.
    pub total_found: usize,
    pub after_dedup: usize,
    /// Articles at or above the relevance cutoff.
    pub after_relevance_filter: usize,
    /// Articles in the final, truncated ranking.
    pub returned: usize,
}

/// Ranked articles plus what happened along the way.
#[derive(Debug)]
pub struct AggregatedSearch {
    pub articles: Vec<ScoredArticle>,
    pub failures: Vec<SourceFailure>,
    pub stats: PipelineStats,
}

impl AggregatedSearch {
    /// True when every queried source answered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Attach relevance, evidence strength and quality tags to an article.
pub fn score_article(article: Article, query: &str, current_year: i32) -> ScoredArticle {
    let relevance_score = relevance_score(&article, query);
    let (evidence_strength, quality_tags) = classify(&article, relevance_score, current_year);
    ScoredArticle {
        article,
        relevance_score,
        evidence_strength,
        quality_tags,
    }
}

/// Run the synchronous pipeline over settled source outcomes.
///
/// # Pipeline
///
/// 1. Merge fulfilled outcomes in the order given; log and record rejections
/// 2. Deduplicate by PMID / DOI / title
/// 3. Score relevance and classify evidence for each article
/// 4. Drop articles below the relevance cutoff, sort by composite score
/// 5. Truncate to `max_results`
///
/// The output depends only on the inputs, never on which source finished
/// first.
pub fn aggregate(
    query: &str,
    outcomes: Vec<SourceOutcome>,
    current_year: i32,
    max_results: usize,
) -> AggregatedSearch {
    let mut merged: Vec<Article> = Vec::new();
    let mut failures: Vec<SourceFailure> = Vec::new();

    for outcome in outcomes {
        match outcome {
            SourceOutcome::Fulfilled { source, articles } => {
                tracing::debug!(%source, count = articles.len(), "source returned articles");
                merged.extend(articles);
            }
            SourceOutcome::Rejected { source, error } => {
                tracing::warn!(
                    %source,
                    error = %error,
                    retryable = error.is_retryable(),
                    "source search failed, continuing without it"
                );
                failures.push(SourceFailure { source, error });
            }
        }
    }

    let total_found = merged.len();
    let deduped = deduplicate(merged);
    let after_dedup = deduped.len();

    let scored: Vec<ScoredArticle> = deduped
        .into_iter()
        .map(|article| score_article(article, query, current_year))
        .collect();
    let after_relevance_filter = scored
        .iter()
        .filter(|a| a.relevance_score >= MIN_RELEVANCE_SCORE)
        .count();

    let articles = rank(scored, current_year, max_results);

    let stats = PipelineStats {
        total_found,
        after_dedup,
        after_relevance_filter,
        returned: articles.len(),
    };
    tracing::debug!(
        total_found,
        after_dedup,
        after_relevance_filter,
        returned = stats.returned,
        "search pipeline complete"
    );
    for (position, a) in articles.iter().take(5).enumerate() {
        tracing::trace!(
            rank = position + 1,
            score = a.relevance_score,
            title = %a.article.title,
            "top article"
        );
    }

    AggregatedSearch {
        articles,
        failures,
        stats,
    }
}

/// Sources to query, in merge order, without duplicates.
pub fn requested_sources(sources: &[Source]) -> Vec<Source> {
    Source::all()
        .iter()
        .copied()
        .filter(|s| sources.contains(s))
        .collect()
}

/// Orchestrate a concurrent search across all configured sources.
///
/// Each source call is bounded by `config.timeout_seconds`; a source that
/// errors or times out is settled as [`SourceOutcome::Rejected`].
///
/// # Errors
///
/// Returns [`SearchError::Http`] only if the HTTP client cannot be built.
/// Source failures never surface here.
pub async fn orchestrate_search(
    query: &str,
    filters: &SearchFilters,
    config: &SearchConfig,
) -> Result<AggregatedSearch, SearchError> {
    let client = build_client(config)?;
    let limit = Duration::from_secs(config.timeout_seconds);

    // 1. Fan out to all sources concurrently.
    let futures: Vec<_> = requested_sources(&config.sources)
        .into_iter()
        .map(|source| {
            let client = client.clone();
            async move {
                let result = tokio::time::timeout(
                    limit,
                    query_source(source, client, query, filters, config),
                )
                .await
                .unwrap_or_else(|_| {
                    Err(SearchError::Timeout(format!(
                        "{source} did not respond within {}s",
                        limit.as_secs()
                    )))
                });
                SourceOutcome::settle(source, result)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    // 2. Run the pipeline against today's year.
    let current_year = chrono::Local::now().year();
    Ok(aggregate(query, outcomes, current_year, config.max_results))
}

/// Query a single source, dispatching to the concrete implementation.
async fn query_source(
    source: Source,
    client: reqwest::Client,
    query: &str,
    filters: &SearchFilters,
    config: &SearchConfig,
) -> Result<Vec<Article>, SearchError> {
    match source {
        Source::PubMed => PubMedSource::new(client, config).search(query, filters).await,
        Source::EuropePmc => {
            EuropePmcSource::new(client, config)
                .search(query, filters)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::types::StudyType;

    const YEAR: i32 = 2026;

    fn make_article(pmid: &str, title: &str, source: &str) -> Article {
        Article {
            pmid: Some(pmid.to_string()),
            title: title.to_string(),
            source: Some(source.to_string()),
            ..Default::default()
        }
    }

    fn pubmed_down() -> SourceOutcome {
        SourceOutcome::Rejected {
            source: Source::PubMed,
            error: SearchError::Backend(BackendError::from_response(
                503,
                r#"{"error":"PubMed unavailable","retryable":true}"#,
            )),
        }
    }

    #[test]
    fn partial_failure_uses_remaining_source() {
        let epmc = vec![
            make_article("1", "Asthma biologics in children", "Europe PMC"),
            make_article("2", "Biologics for severe asthma", "Europe PMC"),
        ];
        let result = aggregate(
            "asthma biologics",
            vec![
                pubmed_down(),
                SourceOutcome::Fulfilled {
                    source: Source::EuropePmc,
                    articles: epmc,
                },
            ],
            YEAR,
            20,
        );

        assert_eq!(result.articles.len(), 2);
        assert!(result
            .articles
            .iter()
            .all(|a| a.article.source.as_deref() == Some("Europe PMC")));
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].source, Source::PubMed);
        assert_eq!(result.failures[0].error.http_status(), Some(503));
        assert!(!result.is_complete());
    }

    #[test]
    fn empty_sources_give_empty_result() {
        let result = aggregate(
            "anything",
            vec![
                SourceOutcome::Fulfilled {
                    source: Source::PubMed,
                    articles: vec![],
                },
                SourceOutcome::Fulfilled {
                    source: Source::EuropePmc,
                    articles: vec![],
                },
            ],
            YEAR,
            20,
        );
        assert!(result.articles.is_empty());
        assert!(result.is_complete());
        assert_eq!(result.stats, PipelineStats::default());
    }

    #[test]
    fn all_sources_failing_is_still_ok() {
        let result = aggregate(
            "anything",
            vec![
                pubmed_down(),
                SourceOutcome::Rejected {
                    source: Source::EuropePmc,
                    error: SearchError::Timeout("Europe PMC".into()),
                },
            ],
            YEAR,
            20,
        );
        assert!(result.articles.is_empty());
        assert_eq!(result.failures.len(), 2);
    }

    #[test]
    fn duplicate_across_sources_keeps_pubmed_copy() {
        let result = aggregate(
            "statin myopathy",
            vec![
                SourceOutcome::Fulfilled {
                    source: Source::PubMed,
                    articles: vec![make_article("77", "Statin myopathy review", "PubMed")],
                },
                SourceOutcome::Fulfilled {
                    source: Source::EuropePmc,
                    articles: vec![make_article("77", "Statin myopathy review", "Europe PMC")],
                },
            ],
            YEAR,
            20,
        );
        assert_eq!(result.stats.total_found, 2);
        assert_eq!(result.stats.after_dedup, 1);
        assert_eq!(result.articles[0].article.source.as_deref(), Some("PubMed"));
    }

    #[test]
    fn stats_track_each_stage() {
        let articles = vec![
            make_article("1", "Heart failure with preserved ejection fraction", "PubMed"),
            make_article("2", "Unrelated dermatology paper", "PubMed"),
            make_article("1", "Heart failure with preserved ejection fraction", "PubMed"),
        ];
        let result = aggregate(
            "heart failure",
            vec![SourceOutcome::Fulfilled {
                source: Source::PubMed,
                articles,
            }],
            YEAR,
            20,
        );
        assert_eq!(
            result.stats,
            PipelineStats {
                total_found: 3,
                after_dedup: 2,
                after_relevance_filter: 1,
                returned: 1,
            }
        );
    }

    #[test]
    fn scored_articles_carry_derived_fields() {
        let mut article = make_article("9", "Empagliflozin in heart failure", "PubMed");
        article.study_type = Some(StudyType::Rct);
        let scored = score_article(article, "empagliflozin heart failure", YEAR);
        assert_eq!(scored.relevance_score, 100);
        assert_eq!(scored.evidence_strength.level, 2);
        assert!(scored
            .quality_tags
            .iter()
            .any(|t| t.label == "Highly Relevant"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let outcomes = || {
            vec![
                SourceOutcome::Fulfilled {
                    source: Source::PubMed,
                    articles: (0..30)
                        .map(|i| {
                            make_article(&i.to_string(), &format!("Sepsis fluids {i}"), "PubMed")
                        })
                        .collect(),
                },
                pubmed_down(),
            ]
        };
        let first = aggregate("sepsis fluids", outcomes(), YEAR, 20);
        let second = aggregate("sepsis fluids", outcomes(), YEAR, 20);
        assert_eq!(first.articles, second.articles);
        assert_eq!(first.articles.len(), 20);
    }

    #[test]
    fn requested_sources_use_merge_order() {
        assert_eq!(
            requested_sources(&[Source::EuropePmc, Source::PubMed, Source::EuropePmc]),
            vec![Source::PubMed, Source::EuropePmc]
        );
        assert_eq!(requested_sources(&[Source::EuropePmc]), vec![Source::EuropePmc]);
    }

    #[test]
    fn outcome_reports_its_source() {
        assert_eq!(pubmed_down().source(), Source::PubMed);
    }
}
