use std::cmp::Reverse;

use super::pairs::CandidatePair;

/// Order candidates by recipient urgency, then compatibility score, both descending.
///
/// `sort_by_key` is stable, so ties keep the generator's emission order. The
/// input slice is left untouched.
pub fn rank(pairs: &[CandidatePair]) -> Vec<CandidatePair> {
    let mut ranked = pairs.to_vec();
    ranked.sort_by_key(|p| (Reverse(p.urgency_level), Reverse(p.compatibility_score)));
    ranked
}
