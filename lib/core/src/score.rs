use crate::disease::Disease;

/// Per-class running scores for a single classification pass.
///
/// Backed by a fixed array indexed by [`Disease`], so every class always has
/// an entry and a class that received no votes reads 0.0. A fresh zeroed map
/// is allocated per request and discarded once the response is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMap {
    scores: [f32; Disease::COUNT],
}

impl ScoreMap {
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            scores: [0.0; Disease::COUNT],
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, disease: Disease) -> f32 {
        self.scores[disease.index()]
    }

    #[inline]
    pub fn add(&mut self, disease: Disease, amount: f32) {
        self.scores[disease.index()] += amount;
    }

    /// Keep the maximum of the current score and `value`.
    #[inline]
    pub fn raise_to(&mut self, disease: Disease, value: f32) {
        let slot = &mut self.scores[disease.index()];
        if value > *slot {
            *slot = value;
        }
    }

    #[inline]
    pub fn scale(&mut self, disease: Disease, factor: f32) {
        self.scores[disease.index()] *= factor;
    }

    /// The maximum score across all classes.
    #[must_use]
    pub fn max_score(&self) -> f32 {
        // Unrepresented classes sit at 0.0, so the max is never negative.
        self.scores.iter().copied().fold(f32::MIN, f32::max)
    }

    /// Divide every score by the current maximum so the top class becomes
    /// 1.0. Skipped entirely when the maximum is not positive.
    pub fn normalize_by_max(&mut self) {
        let max = self.max_score();
        if max > 0.0 {
            for score in &mut self.scores {
                *score /= max;
            }
        }
    }

    /// The winning class and its score.
    ///
    /// Ties resolve to the first label in [`Disease::ALL`] declaration
    /// order, which keeps the outcome deterministic.
    #[must_use]
    pub fn leader(&self) -> (Disease, f32) {
        let mut best = Disease::ALL[0];
        let mut best_score = self.get(best);
        for disease in Disease::ALL.iter().copied().skip(1) {
            let score = self.get(disease);
            if score > best_score {
                best = disease;
                best_score = score;
            }
        }
        (best, best_score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Disease, f32)> + '_ {
        Disease::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

impl Default for ScoreMap {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_an_entry() {
        let scores = ScoreMap::zeroed();
        for (_, score) in scores.iter() {
            assert_eq!(score, 0.0);
        }
        assert_eq!(scores.iter().count(), Disease::COUNT);
    }

    #[test]
    fn test_add_and_raise_to() {
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Ringworm, 0.4);
        scores.add(Disease::Ringworm, 0.2);
        assert!((scores.get(Disease::Ringworm) - 0.6).abs() < 1e-6);

        scores.raise_to(Disease::Healthy, 0.5);
        scores.raise_to(Disease::Healthy, 0.3);
        assert_eq!(scores.get(Disease::Healthy), 0.5);
    }

    #[test]
    fn test_normalize_by_max() {
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Dermatitis, 2.0);
        scores.add(Disease::Healthy, 1.0);
        scores.normalize_by_max();
        assert_eq!(scores.get(Disease::Dermatitis), 1.0);
        assert_eq!(scores.get(Disease::Healthy), 0.5);
        assert_eq!(scores.get(Disease::Ringworm), 0.0);
    }

    #[test]
    fn test_normalize_skipped_when_all_zero() {
        let mut scores = ScoreMap::zeroed();
        scores.normalize_by_max();
        for (_, score) in scores.iter() {
            assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn test_leader_breaks_ties_by_declaration_order() {
        let mut scores = ScoreMap::zeroed();
        scores.add(Disease::Healthy, 1.0);
        scores.add(Disease::Ringworm, 1.0);
        let (winner, score) = scores.leader();
        assert_eq!(winner, Disease::Healthy);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_leader_of_empty_map_is_first_class() {
        let scores = ScoreMap::zeroed();
        let (winner, score) = scores.leader();
        assert_eq!(winner, Disease::Dermatitis);
        assert_eq!(score, 0.0);
    }
}
