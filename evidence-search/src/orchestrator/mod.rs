//! Search orchestrator: concurrent queries, dedup, relevance, grading, ranking.
//!
//! This module fans out a query to every requested source concurrently,
//! deduplicates articles by identifier, scores relevance, grades evidence,
//! and returns a filtered, sorted, truncated result set.

pub mod dedup;
pub mod evidence;
pub mod ranking;
pub mod relevance;
pub mod search;
