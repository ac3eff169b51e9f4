//! Core types for literature records, sources, filters and grading.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// One literature search hit, normalised by the backend.
///
/// Field names follow the backend's camelCase JSON. Unknown fields are
/// ignored; only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// PubMed identifier. Numbers are accepted and kept as strings.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub title: String,
    /// Short author line, e.g. `Smith J, Doe A, et al.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form publication date as printed by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    /// Accepts a JSON number or a numeric string; anything else is absent.
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_type: Option<StudyType>,
    /// Set by the backend for very recent publications.
    #[serde(default)]
    pub is_recent: bool,
    #[serde(default)]
    pub has_full_text: bool,
    /// Display name of the source that returned this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Study design label attached to an article by the backend.
///
/// Unknown labels are preserved verbatim in [`StudyType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StudyType {
    MetaAnalysis,
    SystematicReview,
    Rct,
    ClinicalTrial,
    Guideline,
    Review,
    CaseReport,
    ObservationalStudy,
    ResearchArticle,
    Other(String),
}

impl StudyType {
    /// The exact label used on the wire.
    pub fn label(&self) -> &str {
        match self {
            Self::MetaAnalysis => "Meta-Analysis",
            Self::SystematicReview => "Systematic Review",
            Self::Rct => "RCT",
            Self::ClinicalTrial => "Clinical Trial",
            Self::Guideline => "Guideline",
            Self::Review => "Review",
            Self::CaseReport => "Case Report",
            Self::ObservationalStudy => "Observational Study",
            Self::ResearchArticle => "Research Article",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for StudyType {
    fn from(label: &str) -> Self {
        match label {
            "Meta-Analysis" => Self::MetaAnalysis,
            "Systematic Review" => Self::SystematicReview,
            "RCT" => Self::Rct,
            "Clinical Trial" => Self::ClinicalTrial,
            "Guideline" => Self::Guideline,
            "Review" => Self::Review,
            "Case Report" => Self::CaseReport,
            "Observational Study" => Self::ObservationalStudy,
            "Research Article" => Self::ResearchArticle,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StudyType {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<StudyType> for String {
    fn from(study_type: StudyType) -> Self {
        match study_type {
            StudyType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Literature sources the backend can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "pubmed")]
    PubMed,
    #[serde(rename = "europepmc")]
    EuropePmc,
}

impl Source {
    /// Identifier used in configuration and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::PubMed => "pubmed",
            Self::EuropePmc => "europepmc",
        }
    }

    /// Human-readable name, also stamped on articles as their `source`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PubMed => "PubMed",
            Self::EuropePmc => "Europe PMC",
        }
    }

    /// Backend endpoint path for this source's search.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::PubMed => "/search-pubmed",
            Self::EuropePmc => "/search-europepmc",
        }
    }

    /// All sources, in the order their results are merged.
    pub fn all() -> &'static [Source] {
        &[Self::PubMed, Self::EuropePmc]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pubmed" => Ok(Self::PubMed),
            "europepmc" => Ok(Self::EuropePmc),
            other => Err(SearchError::Config(format!(
                "unknown source '{other}' (expected pubmed or europepmc)"
            ))),
        }
    }
}

/// Publication date window requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "5years")]
    FiveYears,
    #[serde(rename = "10years")]
    TenYears,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OneYear => "1year",
            Self::FiveYears => "5years",
            Self::TenYears => "10years",
        }
    }
}

impl FromStr for DateRange {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "1year" => Ok(Self::OneYear),
            "5years" => Ok(Self::FiveYears),
            "10years" => Ok(Self::TenYears),
            other => Err(SearchError::Config(format!(
                "unknown date range '{other}' (expected all, 1year, 5years or 10years)"
            ))),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Study design restriction requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyTypeFilter {
    #[default]
    All,
    Rct,
    Meta,
    Review,
    Clinical,
    Guideline,
}

impl StudyTypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Rct => "rct",
            Self::Meta => "meta",
            Self::Review => "review",
            Self::Clinical => "clinical",
            Self::Guideline => "guideline",
        }
    }
}

impl FromStr for StudyTypeFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "rct" => Ok(Self::Rct),
            "meta" => Ok(Self::Meta),
            "review" => Ok(Self::Review),
            "clinical" => Ok(Self::Clinical),
            "guideline" => Ok(Self::Guideline),
            other => Err(SearchError::Config(format!(
                "unknown study type '{other}' (all, rct, meta, review, clinical or guideline)"
            ))),
        }
    }
}

impl fmt::Display for StudyTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters forwarded verbatim to every source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub date_range: DateRange,
    pub study_type: StudyTypeFilter,
}

/// Evidence tier derived from the study design alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceStrength {
    /// 1 (strongest) to 5 (weakest).
    pub level: u8,
    pub strength: String,
    pub color: String,
    pub description: String,
}

/// A display badge. Tags never influence ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTag {
    pub label: String,
    pub color: String,
    pub icon: String,
}

/// An article together with the fields computed during aggregation.
///
/// Serialises flat: the derived fields sit beside the article's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    /// Heuristic query match, 0 to 100.
    pub relevance_score: u8,
    pub evidence_strength: EvidenceStrength,
    pub quality_tags: Vec<QualityTag>,
}
