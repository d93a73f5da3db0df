//! Classification pipeline
//!
//! Wires the stages into one stateless pass: encode the text, rank the
//! store, aggregate votes, apply keyword boosts, decide. Every invocation
//! starts from a fresh zeroed score map, so concurrent requests share
//! nothing but the immutable store and trigger table.

use crate::aggregate::{aggregate, VotePolicy};
use crate::boost::{apply_keyword_boost, dampen_uncorroborated_ringworm};
use crate::decide::{decide, Diagnosis};
use crate::keywords::KeywordMatcher;
use crate::rank::rank;
use dermadx_core::{Error, ReferenceStore, Result};
use dermadx_embed::{QueryEncoder, TextEmbedder};
use std::sync::Arc;
use tracing::debug;

/// The hybrid text-to-diagnosis classifier.
///
/// All collaborators are injected at construction; there is no ambient
/// state. The classifier is cheap to share behind an [`Arc`] and safe to
/// call from many threads at once.
pub struct TextClassifier {
    store: Arc<ReferenceStore>,
    encoder: QueryEncoder<Arc<dyn TextEmbedder>>,
    matcher: Box<dyn KeywordMatcher>,
    policy: VotePolicy,
}

impl TextClassifier {
    /// Build a classifier over `store`, embedding queries with `embedder`.
    ///
    /// Fails with [`Error::InvalidDimension`] when the embedder's output
    /// dimensionality does not match a non-empty store.
    pub fn new(
        store: Arc<ReferenceStore>,
        embedder: Arc<dyn TextEmbedder>,
        matcher: Box<dyn KeywordMatcher>,
        policy: VotePolicy,
    ) -> Result<Self> {
        if !store.is_empty() && embedder.dim() != store.dim() {
            return Err(Error::InvalidDimension {
                expected: store.dim(),
                actual: embedder.dim(),
            });
        }

        Ok(Self {
            store,
            encoder: QueryEncoder::new(embedder),
            matcher,
            policy,
        })
    }

    #[must_use]
    pub fn policy(&self) -> VotePolicy {
        self.policy
    }

    #[must_use]
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Classify one symptom description.
    ///
    /// Empty or whitespace-only input is rejected before the embedder is
    /// invoked. Everything else runs the full pipeline and returns the
    /// winning label with its bounded confidence.
    pub fn classify(&self, text: &str) -> Result<Diagnosis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let query = self.encoder.encode(text)?;
        let neighbors = rank(&query, &self.store);
        debug!(neighbors = neighbors.len(), policy = ?self.policy, "ranked reference store");

        let mut scores = aggregate(&neighbors, self.policy);

        let text_lower = text.to_lowercase();
        apply_keyword_boost(&mut scores, &text_lower, self.matcher.as_ref(), self.policy);
        dampen_uncorroborated_ringworm(&mut scores, &text_lower, self.matcher.as_ref(), self.policy);

        let diagnosis = decide(&scores, self.policy);
        debug!(
            disease = %diagnosis.disease,
            confidence = diagnosis.confidence,
            "classification complete"
        );
        Ok(diagnosis)
    }
}
