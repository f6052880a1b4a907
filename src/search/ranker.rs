use crate::search::filter::ScoredCandidate;
use std::cmp::Reverse;

/// Order candidates by match score, highest first.
///
/// The sort is stable: equal scores keep the store's enumeration order.
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by_key(|candidate| Reverse(candidate.match_score));
    candidates
}
