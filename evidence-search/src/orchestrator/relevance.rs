//! Heuristic query relevance for literature records.
//!
//! Scores are additive bonuses clamped to 0..=100:
//!
//! | match                                             | bonus |
//! |---------------------------------------------------|-------|
//! | each query term in the title                      | +40   |
//! | each query term in the abstract                   | +10   |
//! | two or more query terms in the title              | +30   |
//! | each medical phrase in the title                  | +60   |
//! | each medical phrase in the abstract               | +20   |
//! | first 1-3 terms, space-joined, in the title       | +50   |
//! | abstract longer than 100 characters               | +5    |
//!
//! Query terms are whitespace tokens of at least three characters that
//! contain a letter and are not stop words. Medical phrases are adjacent
//! word pairs where either word contains a digit ("type 2", "hiv 1").
//! Downstream filtering depends on the exact numbers, so the weights are
//! fixed.

use crate::types::Article;

/// English filler words dropped from queries before matching.
const STOP_WORDS: &[&str] = &[
    "what", "are", "the", "latest", "for", "in", "of", "and", "or", "a", "an", "is", "on", "with",
    "to", "from", "how", "when", "where", "which", "who", "can", "does", "should", "would",
    "could", "about", "after", "before", "between",
];

const TITLE_TERM_BONUS: u32 = 40;
const ABSTRACT_TERM_BONUS: u32 = 10;
const MULTI_TERM_TITLE_BONUS: u32 = 30;
const TITLE_PHRASE_BONUS: u32 = 60;
const ABSTRACT_PHRASE_BONUS: u32 = 20;
const KEY_PHRASE_BONUS: u32 = 50;
const SUBSTANTIAL_ABSTRACT_BONUS: u32 = 5;
const SUBSTANTIAL_ABSTRACT_CHARS: usize = 100;
const MAX_SCORE: u32 = 100;

/// Split on whitespace runs, keeping an empty token at a leading or
/// trailing whitespace edge. An empty string yields one empty token.
fn split_words(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }
    let mut words: Vec<&str> = text.split_whitespace().collect();
    if text.starts_with(char::is_whitespace) {
        words.insert(0, "");
    }
    if text.ends_with(char::is_whitespace) {
        words.push("");
    }
    words
}

fn is_query_term(word: &str) -> bool {
    word.chars().count() >= 3
        && word.chars().any(|c| c.is_ascii_lowercase())
        && !STOP_WORDS.contains(&word)
}

/// Significant lowercased terms of `query`, in query order.
///
/// Duplicates are kept; each occurrence scores separately.
pub fn query_terms(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    split_words(&lower)
        .into_iter()
        .filter(|w| is_query_term(w))
        .map(String::from)
        .collect()
}

/// Adjacent lowercased word pairs of `query` where either word has a digit.
pub fn medical_phrases(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let has_digit = |w: &str| w.chars().any(|c| c.is_ascii_digit());
    split_words(&lower)
        .windows(2)
        .filter(|pair| has_digit(pair[0]) || has_digit(pair[1]))
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

/// Relevance of `article` to `query`, from 0 to 100.
pub fn relevance_score(article: &Article, query: &str) -> u8 {
    let title = article.title.to_lowercase();
    let abstract_lower = article
        .abstract_text
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let terms = query_terms(query);
    let phrases = medical_phrases(query);

    let title_hits = terms.iter().filter(|t| title.contains(t.as_str())).count() as u32;
    let abstract_hits = terms
        .iter()
        .filter(|t| abstract_lower.contains(t.as_str()))
        .count() as u32;

    let mut score = title_hits * TITLE_TERM_BONUS + abstract_hits * ABSTRACT_TERM_BONUS;

    if title_hits >= 2 {
        score += MULTI_TERM_TITLE_BONUS;
    }

    for phrase in &phrases {
        if title.contains(phrase.as_str()) {
            score += TITLE_PHRASE_BONUS;
        }
        if abstract_lower.contains(phrase.as_str()) {
            score += ABSTRACT_PHRASE_BONUS;
        }
    }

    if terms.len() >= 2 {
        let key_phrase = terms[..terms.len().min(3)].join(" ");
        if title.contains(&key_phrase) {
            score += KEY_PHRASE_BONUS;
        }
    }

    if article
        .abstract_text
        .as_deref()
        .is_some_and(|a| a.chars().count() > SUBSTANTIAL_ABSTRACT_CHARS)
    {
        score += SUBSTANTIAL_ABSTRACT_BONUS;
    }

    // Clamped to MAX_SCORE, so the cast cannot truncate.
    score.min(MAX_SCORE) as u8
}
