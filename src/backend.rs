//! Client for the backend's non-search endpoints.
//!
//! - `GET /health` reports whether the backend is reachable
//! - `POST /generate-response` turns a question plus ranked articles into
//!   an evidence-based answer with suggested follow-up questions
//!
//! Failed calls carry the same [`BackendError`] payload as search failures.

use evidence_search::http::build_client;
use evidence_search::{BackendError, ScoredArticle, SearchConfig, SearchError};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One turn of the conversation so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// An answer synthesised from the supplied articles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAnswer {
    pub response: String,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    query: &'a str,
    articles: &'a [ScoredArticle],
    conversation_history: &'a [ChatMessage],
}

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client using the backend URL and timeout of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Whether the backend answers `GET /health` with a success status.
    ///
    /// Never fails; transport errors are logged and reported as `false`.
    pub async fn health(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "backend health check failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "backend health check failed");
                false
            }
        }
    }

    /// Ask the backend to answer `query` from `articles`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Backend`] for a non-success status,
    /// [`SearchError::Timeout`] or [`SearchError::Http`] for transport
    /// failures, and [`SearchError::Parse`] for an unreadable answer.
    pub async fn generate_response(
        &self,
        query: &str,
        articles: &[ScoredArticle],
        history: &[ChatMessage],
    ) -> Result<GeneratedAnswer> {
        tracing::debug!(articles = articles.len(), turns = history.len(), "requesting answer");

        let response = self
            .client
            .post(self.url("/generate-response"))
            .json(&GenerateRequest {
                query,
                articles,
                conversation_history: history,
            })
            .send()
            .await
            .map_err(|e| SearchError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_transport(&e))?;

        if !status.is_success() {
            return Err(BackendError::from_response(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(format!("invalid answer from backend: {e}")).into())
    }
}
