//! Result ordering for each pool.

use crate::model::ScoredCandidate;

/// Sorts national candidates by `match_score` descending.
///
/// The sort is stable: candidates with equal scores keep the order the
/// directory returned them in.
pub fn sort_national(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}

/// Sorts international candidates by `match_score` descending, then by the
/// secondary metric descending (missing counts as zero).
///
/// Stable for candidates equal on both keys.
pub fn sort_international(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.match_score.cmp(&a.match_score).then_with(|| {
            b.secondary_metric_or_zero()
                .total_cmp(&a.secondary_metric_or_zero())
        })
    });
}
