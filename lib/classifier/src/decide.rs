//! Decision policy
//!
//! Picks the winning class from the final scores and derives the bounded,
//! human-facing confidence percentage. Confidence is not a calibrated
//! probability; it is the winning score scaled into a percentage range and
//! clamped.

use crate::aggregate::VotePolicy;
use dermadx_core::{Disease, ScoreMap};

/// Upper bound for the reported confidence percentage.
pub const MAX_CONFIDENCE: f32 = 99.9;

/// Final classification outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnosis {
    pub disease: Disease,
    /// Percentage in `[0.0, 99.9]`.
    pub confidence: f32,
}

impl Diagnosis {
    /// Confidence rendered the way the API reports it: one decimal place
    /// and a `%` suffix, e.g. `"87.5%"`.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

/// Pick the winner and derive its confidence under `policy`.
///
/// Ties resolve to the first label in declaration order. A zero winning
/// score (no signal at all) yields 0.0 confidence; a negative winning score
/// clamps to 0.0 as well.
#[must_use]
pub fn decide(scores: &ScoreMap, policy: VotePolicy) -> Diagnosis {
    let (disease, score) = scores.leader();
    let confidence = (score * policy.confidence_scale()).clamp(0.0, MAX_CONFIDENCE);
    Diagnosis {
        disease,
        confidence,
    }
}
