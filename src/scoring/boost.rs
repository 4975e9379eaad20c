//! Field-match boost applied on top of the keyword score.

use crate::model::Candidate;

/// Points added when the field matches and keywords already scored.
pub const FIELD_MATCH_BONUS: u8 = 20;

/// Score given to a field-matched local journal whose keywords did not match.
pub const NATIONAL_FIELD_BASELINE: u8 = 50;

/// Score given to a field-matched external journal whose keywords did not match.
///
/// Lower than the national baseline: catalog subject areas are less curated.
pub const INTERNATIONAL_FIELD_BASELINE: u8 = 40;

/// Returns true when two subject labels overlap.
///
/// Comparison is case-insensitive and ignores surrounding whitespace. Either
/// side may contain the other, so a blank label overlaps every label: a
/// keywords-only query treats every journal as in-field.
#[must_use]
pub fn fields_overlap(left: &str, right: &str) -> bool {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();
    left.contains(&right) || right.contains(&left)
}

/// Returns true when any of the candidate's subject labels overlaps `field`.
#[must_use]
pub fn candidate_matches_field(candidate: &Candidate, field: &str) -> bool {
    candidate
        .field_labels()
        .any(|label| fields_overlap(label, field))
}

/// Applies the field-match boost to a keyword score.
///
/// A field match lifts a zero score to `baseline` and otherwise adds
/// [`FIELD_MATCH_BONUS`], capped at 100. Without a field match the base score
/// is returned unchanged.
#[must_use]
pub fn apply_field_boost(base: u8, field_matches: bool, baseline: u8) -> u8 {
    if !field_matches {
        return base;
    }
    if base == 0 {
        baseline.min(100)
    } else {
        base.saturating_add(FIELD_MATCH_BONUS).min(100)
    }
}
