//! Relevance scoring for journal candidates.
//!
//! # Architecture
//!
//! - [`score`] - Fuzzy keyword/scope similarity in `0..=100`
//! - [`apply_field_boost`] - Adjustment for journals whose subject area matches the query field
//! - [`normalize_term`] - Shared lexical normalization

mod boost;
mod normalizer;
mod similarity;

pub use boost::{
    FIELD_MATCH_BONUS, INTERNATIONAL_FIELD_BASELINE, NATIONAL_FIELD_BASELINE, apply_field_boost,
    candidate_matches_field, fields_overlap,
};
pub use normalizer::{
    MIN_QUERY_TERM_LEN, normalize_query_terms, normalize_scope_terms, normalize_term,
};
pub use similarity::{EXACT_MATCH, SUBSTRING_MATCH, WORD_OVERLAP_MATCH, best_match, score};

use crate::model::{Candidate, Query, ScoredCandidate};

/// Scores one candidate against a query: keyword similarity plus field boost.
#[must_use]
pub fn score_candidate(query: &Query, candidate: Candidate, baseline: u8) -> ScoredCandidate {
    let base = score(&query.keywords, &candidate.scope);
    let field_matches = candidate_matches_field(&candidate, &query.field);
    let match_score = apply_field_boost(base, field_matches, baseline);
    ScoredCandidate {
        candidate,
        match_score,
    }
}
