//! Evidence strength grading and display quality tags.
//!
//! Strength is a fixed lookup on the study design. Tags are independent
//! badges computed from relevance, journal, recency and full-text
//! availability; they are display metadata only and never affect ranking.

use crate::types::{Article, EvidenceStrength, QualityTag, StudyType};

/// Relevance at or above which an article is tagged "Highly Relevant".
const HIGHLY_RELEVANT_SCORE: u8 = 80;

/// Publications at most this many years old count as "Recent".
const RECENT_MAX_AGE_YEARS: i32 = 2;

/// Age window (inclusive) for "Well-Established" strong designs.
const ESTABLISHED_AGE_YEARS: std::ops::RangeInclusive<i32> = 3..=10;

/// High-impact journals, lowercased, by full name and common abbreviation.
const LEADING_JOURNALS: &[&str] = &[
    "new england journal of medicine",
    "the new england journal of medicine",
    "n engl j med",
    "nejm",
    "lancet",
    "the lancet",
    "jama",
    "journal of the american medical association",
    "bmj",
    "british medical journal",
    "nature",
    "nature medicine",
    "nat med",
    "science",
    "cell",
    "annals of internal medicine",
    "ann intern med",
    "jama internal medicine",
    "jama intern med",
    "plos medicine",
    "plos med",
    "circulation",
    "journal of clinical oncology",
    "j clin oncol",
    "cochrane database of systematic reviews",
    "cochrane database syst rev",
];

fn strength(level: u8, strength: &str, color: &str, description: &str) -> EvidenceStrength {
    EvidenceStrength {
        level,
        strength: strength.to_string(),
        color: color.to_string(),
        description: description.to_string(),
    }
}

/// Evidence tier for a study design. Unknown or missing designs get the
/// weakest tier.
pub fn evidence_strength(study_type: Option<&StudyType>) -> EvidenceStrength {
    match study_type {
        Some(StudyType::MetaAnalysis) => strength(
            1,
            "Very High",
            "purple",
            "Meta-analysis pooling results across multiple studies",
        ),
        Some(StudyType::SystematicReview) => strength(
            1,
            "Very High",
            "purple",
            "Systematic review of the available evidence",
        ),
        Some(StudyType::Rct) => strength(2, "High", "green", "Randomized controlled trial"),
        Some(StudyType::Guideline) => strength(
            2,
            "High",
            "amber",
            "Clinical practice guideline from an expert body",
        ),
        Some(StudyType::ClinicalTrial) => strength(
            3,
            "Moderate-High",
            "blue",
            "Clinical trial without confirmed randomization",
        ),
        Some(StudyType::Review) => strength(
            3,
            "Moderate",
            "indigo",
            "Narrative review summarizing existing research",
        ),
        Some(StudyType::ObservationalStudy) => strength(
            4,
            "Low-Moderate",
            "slate",
            "Observational study; associations, not causation",
        ),
        Some(StudyType::ResearchArticle) => strength(
            4,
            "Low-Moderate",
            "slate",
            "Primary research article",
        ),
        Some(StudyType::CaseReport) => strength(
            5,
            "Low",
            "gray",
            "Case report describing individual patients",
        ),
        Some(StudyType::Other(_)) | None => strength(5, "Low", "gray", "Study design not reported"),
    }
}

/// Whether `journal` names a high-impact journal.
///
/// Matching is on the whole name after lowercasing, trimming, and removing
/// trailing periods, so "The Lancet" matches but "Lancet Oncology" does not.
pub fn is_leading_journal(journal: &str) -> bool {
    let name = journal.trim().trim_end_matches('.').to_lowercase();
    LEADING_JOURNALS.contains(&name.as_str())
}

fn tag(label: &str, color: &str, icon: &str) -> QualityTag {
    QualityTag {
        label: label.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
    }
}

/// Display badges for an article, in a fixed order.
pub fn quality_tags(article: &Article, relevance_score: u8, current_year: i32) -> Vec<QualityTag> {
    let mut tags = Vec::new();
    let age = article.publication_year.map(|year| current_year - year);

    if relevance_score >= HIGHLY_RELEVANT_SCORE {
        tags.push(tag("Highly Relevant", "violet", "🎯"));
    }

    if article.journal.as_deref().is_some_and(is_leading_journal) {
        tags.push(tag("Leading Journal", "amber", "🏆"));
    }

    if article.is_recent {
        tags.push(tag("New Research", "emerald", "✨"));
    } else if age.is_some_and(|a| a <= RECENT_MAX_AGE_YEARS) {
        tags.push(tag("Recent", "sky", "🆕"));
    }

    if article.has_full_text {
        tags.push(tag("Full Text", "lime", "📄"));
    }

    let strong_design = matches!(
        article.study_type,
        Some(StudyType::MetaAnalysis | StudyType::SystematicReview | StudyType::Rct)
    );
    if strong_design && age.is_some_and(|a| ESTABLISHED_AGE_YEARS.contains(&a)) {
        tags.push(tag("Well-Established", "cyan", "🏛️"));
    }

    tags
}

/// Evidence strength and quality tags together.
pub fn classify(
    article: &Article,
    relevance_score: u8,
    current_year: i32,
) -> (EvidenceStrength, Vec<QualityTag>) {
    (
        evidence_strength(article.study_type.as_ref()),
        quality_tags(article, relevance_score, current_year),
    )
}
