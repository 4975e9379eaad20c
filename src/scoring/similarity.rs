//! Fuzzy lexical overlap between query keywords and a journal's scope.
//!
//! Curated scope vocabularies rarely repeat an author's keywords verbatim, so
//! each query term is credited with its best *graded* match instead of a
//! strict set intersection, and the total is folded into a Dice coefficient.

use super::normalizer::{normalize_query_terms, normalize_scope_terms};

/// Credit for an exact term match.
pub const EXACT_MATCH: f64 = 1.0;

/// Credit when one term contains the other (e.g. `media` / `media studies`).
pub const SUBSTRING_MATCH: f64 = 0.75;

/// Credit when only individual words overlap.
pub const WORD_OVERLAP_MATCH: f64 = 0.3;

/// Fixed amplification (x1.2) applied directly on the percentage scale, so
/// well-matched journals land near 90-100.
const AMPLIFIED_PERCENT: f64 = 120.0;

/// Scores how well `query_terms` cover `scope_terms`, in `0..=100`.
///
/// Returns 0 when no query term survives normalization or when the scope is
/// empty. The result does not depend on the order of either input.
#[must_use]
pub fn score(query_terms: &[String], scope_terms: &[String]) -> u8 {
    let query = normalize_query_terms(query_terms);
    let scope = normalize_scope_terms(scope_terms);

    if query.is_empty() || scope.is_empty() {
        return 0;
    }

    let intersection: f64 = query.iter().map(|term| best_match(term, &scope)).sum();

    #[allow(clippy::cast_precision_loss)]
    let union_size = (query.len() + scope.len()) as f64;
    let dice = 2.0 * intersection / union_size;

    to_percentage(dice)
}

/// Returns the highest credit `term` earns against any scope term.
///
/// Every scope term is inspected; a weaker match early in the list never
/// hides a stronger one later.
#[must_use]
pub fn best_match(term: &str, scope: &[String]) -> f64 {
    scope
        .iter()
        .map(|candidate| term_credit(term, candidate))
        .fold(0.0, f64::max)
}

fn term_credit(term: &str, scope_term: &str) -> f64 {
    if scope_term.is_empty() || term.is_empty() {
        return 0.0;
    }
    if term == scope_term {
        EXACT_MATCH
    } else if scope_term.contains(term) || term.contains(scope_term) {
        SUBSTRING_MATCH
    } else if words_overlap(term, scope_term) {
        WORD_OVERLAP_MATCH
    } else {
        0.0
    }
}

fn words_overlap(term: &str, scope_term: &str) -> bool {
    term.split_whitespace().any(|word| {
        scope_term
            .split_whitespace()
            .any(|scope_word| scope_word.contains(word) || word.contains(scope_word))
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percentage(similarity: f64) -> u8 {
    // A single multiplication keeps exact halves (e.g. 22.5) exact before rounding.
    (similarity * AMPLIFIED_PERCENT).clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    // ==================== Bounds & Empty Inputs ====================

    #[test]
    fn test_score_empty_scope_is_zero() {
        assert_eq!(score(&strings(&["media"]), &[]), 0);
    }

    #[test]
    fn test_score_empty_query_is_zero() {
        assert_eq!(score(&[], &strings(&["media"])), 0);
    }

    #[test]
    fn test_score_only_short_query_terms_is_zero() {
        assert_eq!(score(&strings(&["AI", "ml"]), &strings(&["ai", "ml"])), 0);
    }

    #[test]
    fn test_score_identical_single_term_saturates() {
        assert_eq!(score(&strings(&["Media"]), &strings(&["media"])), 100);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let cases = [
            (strings(&["media", "media", "media"]), strings(&["media"])),
            (strings(&["x y z", "abc"]), strings(&["", "", ""])),
            (strings(&["law"]), strings(&["law", "law", "law", "law"])),
        ];
        for (query, scope) in cases {
            assert!(score(&query, &scope) <= 100);
        }
    }

    // ==================== Match Tiers ====================

    #[test]
    fn test_score_substring_match() {
        // 2 * 0.75 / (1 + 1) = 0.75 -> 0.9 -> 90
        assert_eq!(score(&strings(&["media"]), &strings(&["Media Studies"])), 90);
    }

    #[test]
    fn test_score_word_overlap_match() {
        // "digital marketing" vs "marketing research": no containment, words overlap
        // 2 * 0.3 / 2 = 0.3 -> 0.36 -> 36
        assert_eq!(
            score(&strings(&["digital marketing"]), &strings(&["marketing research"])),
            36
        );
    }

    #[test]
    fn test_score_no_overlap_is_zero() {
        assert_eq!(score(&strings(&["astronomy"]), &strings(&["criminal law"])), 0);
    }

    #[test]
    fn test_score_mixed_terms_dice_form() {
        // media -> 0.75, broadcasting -> 0; 2 * 0.75 / 3 = 0.5 -> 0.6 -> 60
        assert_eq!(
            score(&strings(&["media", "broadcasting"]), &strings(&["Media Studies"])),
            60
        );
    }

    #[test]
    fn test_score_rounds_exact_half_up() {
        // 2 * 0.75 / (1 + 7) = 0.1875 -> 22.5 -> 23
        let scope = strings(&["Media Studies", "aaa", "bbb", "ccc", "ddd", "eee", "fff"]);
        assert_eq!(score(&strings(&["media"]), &scope), 23);
    }

    #[test]
    fn test_to_percentage_halves_and_saturation() {
        assert_eq!(to_percentage(0.1875), 23);
        assert_eq!(to_percentage(0.0), 0);
        assert_eq!(to_percentage(1.0), 100);
        assert_eq!(to_percentage(0.9), 100);
    }

    #[test]
    fn test_score_counts_duplicate_scope_terms() {
        // 2 * 1.0 / (1 + 2) = 0.667 -> 0.8 -> 80
        assert_eq!(score(&strings(&["law"]), &strings(&["law", "law"])), 80);
    }

    #[test]
    fn test_empty_scope_terms_never_match() {
        assert!(best_match("media", &strings(&["", ""])).abs() < f64::EPSILON);
        assert_eq!(score(&strings(&["media"]), &strings(&["", "!!"])), 0);
    }

    #[test]
    fn test_best_match_scans_all_scope_terms() {
        let scope = strings(&["media studies", "social media", "media"]);
        assert!((best_match("media", &scope) - EXACT_MATCH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_match_dominates_partial_matches() {
        let exact = best_match("journalism", &strings(&["journalism"]));
        let partial = best_match("journalism", &strings(&["online journalism", "journalism ethics"]));
        let loose = best_match("data journalism", &strings(&["journalism ethics"]));
        assert!(exact >= partial);
        assert!(exact >= loose);
        assert!(partial >= loose);
    }

    #[test]
    fn test_multiple_spaces_do_not_create_empty_word_matches() {
        // Empty words from repeated spaces must not count as overlap.
        assert!(!words_overlap("machine  learning", "botany"));
    }

    // ==================== Permutation Invariance ====================

    #[test]
    fn test_score_ignores_input_order() {
        let query = strings(&["media", "public relations", "advertising"]);
        let scope = strings(&["Advertising", "Media Studies", "Journalism", "Relations"]);

        let mut query_reversed = query.clone();
        query_reversed.reverse();
        let mut scope_rotated = scope.clone();
        scope_rotated.rotate_left(2);

        let baseline = score(&query, &scope);
        assert_eq!(score(&query_reversed, &scope), baseline);
        assert_eq!(score(&query, &scope_rotated), baseline);
        assert_eq!(score(&query_reversed, &scope_rotated), baseline);
    }
}
