//! Backend search endpoint contract tests.
//!
//! These tests verify the request body sent to `/search-pubmed` and
//! `/search-europepmc`, response decoding, error mapping and the
//! per-source failure isolation of a full search.

use std::time::Duration;

use evidence_search::sources::{EuropePmcSource, PubMedSource};
use evidence_search::{
    search_multiple_sources, search_with_report, DateRange, LiteratureSource, SearchConfig,
    SearchError, SearchFilters, Source, StudyType, StudyTypeFilter,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        base_url: server.uri(),
        timeout_seconds: 2,
        cache_ttl_seconds: 0,
        ..Default::default()
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_query_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .and(body_partial_json(json!({
            "query": "asthma biologics",
            "filters": {"dateRange": "5years", "studyType": "rct"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .expect(1)
        .mount(&server)
        .await;

    let source = PubMedSource::new(client(), &config_for(&server));
    let filters = SearchFilters {
        date_range: DateRange::FiveYears,
        study_type: StudyTypeFilter::Rct,
    };
    let articles = source.search("asthma biologics", &filters).await.expect("search");
    assert!(articles.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Response parsing
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_articles_are_decoded_and_stamped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-europepmc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                {
                    "pmid": 38123456,
                    "title": "Dupilumab in moderate-to-severe asthma",
                    "abstract": "A randomized trial.",
                    "journal": "N Engl J Med",
                    "publicationYear": "2024",
                    "studyType": "RCT",
                    "hasFullText": true
                },
                {"abstract": "no title, skipped"},
                {
                    "doi": "10.1000/xyz",
                    "title": "Tezepelumab review",
                    "source": "Europe PMC (preprint)"
                }
            ]
        })))
        .mount(&server)
        .await;

    let source = EuropePmcSource::new(client(), &config_for(&server));
    let articles = source
        .search("asthma", &SearchFilters::default())
        .await
        .expect("search");

    assert_eq!(articles.len(), 2);
    let first = &articles[0];
    assert_eq!(first.pmid.as_deref(), Some("38123456"));
    assert_eq!(first.publication_year, Some(2024));
    assert_eq!(first.study_type, Some(StudyType::Rct));
    assert!(first.has_full_text);
    assert_eq!(first.source.as_deref(), Some("Europe PMC"));
    assert_eq!(articles[1].source.as_deref(), Some("Europe PMC (preprint)"));
}

#[tokio::test]
async fn test_missing_articles_field_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;

    let source = PubMedSource::new(client(), &config_for(&server));
    let articles = source
        .search("asthma", &SearchFilters::default())
        .await
        .expect("search");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_non_json_success_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let source = PubMedSource::new(client(), &config_for(&server));
    let err = source
        .search("asthma", &SearchFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

// ────────────────────────────────────────────────────────────────────────────
// Error handling
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_payload_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "NCBI rate limit exceeded",
            "retryable": true,
            "retryAfter": 3
        })))
        .mount(&server)
        .await;

    let source = PubMedSource::new(client(), &config_for(&server));
    let err = source
        .search("asthma", &SearchFilters::default())
        .await
        .unwrap_err();

    match err {
        SearchError::Backend(backend) => {
            assert_eq!(backend.status, 500);
            assert_eq!(backend.message, "NCBI rate limit exceeded");
            assert!(backend.retryable);
            assert_eq!(backend.payload["retryAfter"], 3);
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_uses_status_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-europepmc"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let source = EuropePmcSource::new(client(), &config_for(&server));
    let err = source
        .search("asthma", &SearchFilters::default())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(400));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("Backend error: 400"));
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregated search
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_source_does_not_fail_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "down"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search-europepmc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                {"pmid": "1", "title": "Severe asthma biologics"},
                {"pmid": "2", "title": "Knee osteoarthritis"}
            ]
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let report = search_with_report("asthma biologics", &SearchFilters::default(), &config)
        .await
        .expect("search");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, Source::PubMed);
    assert_eq!(report.failures[0].error.http_status(), Some(503));
    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].article.title, "Severe asthma biologics");
    assert_eq!(report.stats.total_found, 2);
}

#[tokio::test]
async fn test_all_sources_failing_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let articles = search_multiple_sources("asthma", &SearchFilters::default(), &config)
        .await
        .expect("search");
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_empty_aggregate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .expect(2)
        .mount(&server)
        .await;

    let report = search_with_report("asthma", &SearchFilters::default(), &config_for(&server))
        .await
        .expect("search");
    assert!(report.articles.is_empty());
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_duplicates_across_sources_collapse() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"pmid": "77", "title": "Asthma biologics", "studyType": "Meta-Analysis"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search-europepmc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"pmid": "77", "title": "Asthma Biologics.", "hasFullText": true}]
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let articles = search_multiple_sources("asthma biologics", &SearchFilters::default(), &config)
        .await
        .expect("search");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].article.source.as_deref(), Some("PubMed"));
    assert_eq!(articles[0].evidence_strength.level, 1);
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search-pubmed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"articles": [{"title": "Asthma late"}]}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search-europepmc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{"title": "Asthma on time"}]
        })))
        .mount(&server)
        .await;

    let config = SearchConfig {
        timeout_seconds: 1,
        ..config_for(&server)
    };
    let report = search_with_report("asthma", &SearchFilters::default(), &config)
        .await
        .expect("search");

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, SearchError::Timeout(_)));
    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].article.title, "Asthma on time");
}
