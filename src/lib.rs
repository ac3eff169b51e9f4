//! medevidence: evidence-graded medical literature search.
//!
//! This crate is the client side of a clinical question-answering service:
//! Question → PubMed + Europe PMC search → ranked evidence → backend answer
//!
//! # Architecture
//!
//! - **Search**: fan-out, dedup, relevance scoring, evidence grading and
//!   ranking live in the [`evidence_search`] workspace crate
//! - **Backend**: health checks and answer generation via [`backend`]
//! - **Config**: TOML file with backend and search defaults via [`config`]
//! - **CLI**: the `medevidence` binary in `src/bin/cli.rs`

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{BackendClient, ChatMessage, GeneratedAnswer};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use evidence_search::{
    search_multiple_sources, search_with_report, Article, DateRange, ScoredArticle, SearchConfig,
    SearchFilters, Source, StudyType, StudyTypeFilter,
};
