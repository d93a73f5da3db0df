//! Vote aggregation
//!
//! Folds the ranked neighbor list into one score per disease class. Two
//! policies exist because the reference system shipped both at different
//! times; the constants of each policy (keyword bonus, confidence scale)
//! are calibrated against that policy's score range and must never be
//! mixed, so they live on the policy itself.

use crate::rank::Neighbor;
use dermadx_core::ScoreMap;

/// Neighbors counted by the top-K-sum policy.
pub const TOP_K: usize = 30;

/// How ranked neighbors turn into per-class scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePolicy {
    /// Sum the similarities of the top [`TOP_K`] neighbors per class, then
    /// divide every class by the maximum class score.
    TopKSum,
    /// Keep the single highest similarity seen per class, over all
    /// neighbors. Scores stay in the embedding model's bounded range, so no
    /// normalization follows.
    GlobalMax,
}

impl VotePolicy {
    /// Fixed bonus added to a class when one of its keywords matches.
    #[must_use]
    pub fn keyword_bonus(&self) -> f32 {
        match self {
            VotePolicy::TopKSum => 2.0,
            VotePolicy::GlobalMax => 0.5,
        }
    }

    /// Factor scaling the winning score into a percentage.
    #[must_use]
    pub fn confidence_scale(&self) -> f32 {
        match self {
            VotePolicy::TopKSum => 35.0,
            VotePolicy::GlobalMax => 100.0,
        }
    }

    /// Whether the uncorroborated-ringworm dampening rule applies.
    #[must_use]
    pub fn dampens_uncorroborated_ringworm(&self) -> bool {
        matches!(self, VotePolicy::TopKSum)
    }
}

/// Aggregate ranked neighbors into per-class scores under `policy`.
///
/// Every class is present in the result; classes without votes stay at 0.0.
#[must_use]
pub fn aggregate(neighbors: &[Neighbor], policy: VotePolicy) -> ScoreMap {
    let mut scores = ScoreMap::zeroed();

    match policy {
        VotePolicy::TopKSum => {
            // take() copes with stores smaller than K
            for neighbor in neighbors.iter().take(TOP_K) {
                scores.add(neighbor.label, neighbor.similarity);
            }
            scores.normalize_by_max();
        }
        VotePolicy::GlobalMax => {
            for neighbor in neighbors {
                scores.raise_to(neighbor.label, neighbor.similarity);
            }
        }
    }

    scores
}
