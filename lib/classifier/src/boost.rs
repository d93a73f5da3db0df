//! Heuristic boost layer
//!
//! Adjusts the aggregated scores with keyword evidence, independent of the
//! embedding signal. Runs in two strictly ordered steps: the per-class
//! keyword bonus first, then the uncorroborated-ringworm dampening.

use crate::aggregate::VotePolicy;
use crate::keywords::KeywordMatcher;
use dermadx_core::{Disease, ScoreMap};
use tracing::debug;

/// Ringworm score above which dampening is considered.
const RINGWORM_DAMPEN_THRESHOLD: f32 = 0.8;

/// Factor applied to an uncorroborated ringworm score.
const RINGWORM_DAMPEN_FACTOR: f32 = 0.3;

/// Add the policy's fixed bonus to every class with a trigger match.
///
/// A class is boosted at most once regardless of how many of its triggers
/// occur; classes with overlapping trigger substrings are boosted
/// independently of each other. Returns the boosted classes.
pub fn apply_keyword_boost(
    scores: &mut ScoreMap,
    text_lower: &str,
    matcher: &dyn KeywordMatcher,
    policy: VotePolicy,
) -> Vec<Disease> {
    let bonus = policy.keyword_bonus();
    let mut boosted = Vec::new();

    for disease in Disease::ALL {
        if matcher.matches(text_lower, disease) {
            scores.add(disease, bonus);
            boosted.push(disease);
        }
    }

    if !boosted.is_empty() {
        debug!(?boosted, bonus, "keyword boost applied");
    }

    boosted
}

/// Suppress a high ringworm score that has no textual corroboration.
///
/// Embedding similarity alone over-favors ringworm; when its score exceeds
/// the threshold and none of ringworm's own triggers matched, the score is
/// scaled down. Only the top-K-sum policy uses this rule, and only ringworm's
/// own trigger set is consulted. Must run after [`apply_keyword_boost`].
pub fn dampen_uncorroborated_ringworm(
    scores: &mut ScoreMap,
    text_lower: &str,
    matcher: &dyn KeywordMatcher,
    policy: VotePolicy,
) {
    if !policy.dampens_uncorroborated_ringworm() {
        return;
    }

    if scores.get(Disease::Ringworm) > RINGWORM_DAMPEN_THRESHOLD
        && !matcher.matches(text_lower, Disease::Ringworm)
    {
        scores.scale(Disease::Ringworm, RINGWORM_DAMPEN_FACTOR);
        debug!(
            score = scores.get(Disease::Ringworm),
            "dampened uncorroborated ringworm score"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::SubstringMatcher;

    #[test]
    fn test_boost_adds_bonus_once_per_class() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        // Two Dermatitis triggers ("hot spot", "raw") but a single bonus
        let boosted = apply_keyword_boost(
            &mut scores,
            "hot spot with raw skin",
            &matcher,
            VotePolicy::TopKSum,
        );
        assert_eq!(boosted, vec![Disease::Dermatitis]);
        assert_eq!(scores.get(Disease::Dermatitis), 2.0);
    }

    #[test]
    fn test_boost_is_policy_scaled() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        apply_keyword_boost(&mut scores, "fleas near the tail", &matcher, VotePolicy::GlobalMax);
        assert_eq!(scores.get(Disease::Hypersensitivity), 0.5);
    }

    #[test]
    fn test_no_triggers_leaves_scores_untouched() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Healthy, 0.4);
        let before = scores;

        let boosted = apply_keyword_boost(
            &mut scores,
            "something entirely unrelated",
            &matcher,
            VotePolicy::TopKSum,
        );
        assert!(boosted.is_empty());
        assert_eq!(scores, before);
    }

    #[test]
    fn test_dampening_fires_without_corroboration() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Ringworm, 1.0);

        dampen_uncorroborated_ringworm(
            &mut scores,
            "itchy dull coat",
            &matcher,
            VotePolicy::TopKSum,
        );
        assert!((scores.get(Disease::Ringworm) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_dampening_skipped_when_keywords_corroborate() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Ringworm, 1.0);

        dampen_uncorroborated_ringworm(
            &mut scores,
            "a circular bald spot",
            &matcher,
            VotePolicy::TopKSum,
        );
        assert_eq!(scores.get(Disease::Ringworm), 1.0);
    }

    #[test]
    fn test_dampening_skipped_below_threshold() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Ringworm, 0.8);

        dampen_uncorroborated_ringworm(
            &mut scores,
            "itchy dull coat",
            &matcher,
            VotePolicy::TopKSum,
        );
        // 0.8 is not strictly above the threshold
        assert_eq!(scores.get(Disease::Ringworm), 0.8);
    }

    #[test]
    fn test_dampening_never_applies_under_global_max() {
        let matcher = SubstringMatcher::builtin();
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Ringworm, 1.0);

        dampen_uncorroborated_ringworm(
            &mut scores,
            "itchy dull coat",
            &matcher,
            VotePolicy::GlobalMax,
        );
        assert_eq!(scores.get(Disease::Ringworm), 1.0);
    }
}
