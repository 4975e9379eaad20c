//! Term normalization ahead of similarity scoring.

use tracing::instrument;

/// Normalized query terms this short or shorter are treated as noise.
pub const MIN_QUERY_TERM_LEN: usize = 3;

/// Normalizes a single term for lexical comparison.
///
/// Normalization steps:
/// 1. Convert to lowercase
/// 2. Trim surrounding whitespace
/// 3. Drop every character outside `[a-z0-9 ]`
///
/// Internal spaces survive so multi-word phrases can still be compared
/// word by word.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// Normalizes query keywords and drops stopword-like short terms.
///
/// Order and duplicates are preserved; the scorer counts every term.
#[must_use]
#[instrument(level = "trace", skip(terms), fields(count = terms.len()))]
pub fn normalize_query_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| normalize_term(term))
        .filter(|term| term.len() >= MIN_QUERY_TERM_LEN)
        .collect()
}

/// Normalizes a journal's scope terms.
///
/// No length filter applies here; empty results are kept so they still count
/// toward the union size.
#[must_use]
pub fn normalize_scope_terms(terms: &[String]) -> Vec<String> {
    terms.iter().map(|term| normalize_term(term)).collect()
}
