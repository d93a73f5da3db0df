//! Query encoding
//!
//! A raw symptom description is a poor query on its own: the reference
//! vectors were built from captioned clinical phrases. The encoder expands
//! the text into several prompt variants, embeds them as one batch, and
//! mean-pools the results back into a single unit-length query vector.

use crate::embedder::TextEmbedder;
use dermadx_core::{Error, Result, Vector};

/// Prompt templates applied to the user text before embedding.
///
/// `{}` is replaced with the raw text; the raw text itself is always
/// included as the final variant.
const PROMPT_TEMPLATES: [&str; 2] = [
    "a photo of a dog with {}",
    "veterinary clinical image of {}",
];

/// Turns symptom text into a single query vector via prompt ensembling.
pub struct QueryEncoder<E: TextEmbedder> {
    embedder: E,
}

impl<E: TextEmbedder> QueryEncoder<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn dim(&self) -> usize {
        self.embedder.dim()
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Encode `text` into one unit-normalized query vector.
    ///
    /// The mean of unit vectors is shorter than unit length, so the pooled
    /// vector is re-normalized before it is returned.
    pub fn encode(&self, text: &str) -> Result<Vector> {
        let prompts: Vec<String> = PROMPT_TEMPLATES
            .iter()
            .map(|template| template.replace("{}", text))
            .chain(std::iter::once(text.to_string()))
            .collect();
        let prompt_refs: Vec<&str> = prompts.iter().map(String::as_str).collect();

        let vectors = self.embedder.embed_batch(&prompt_refs)?;
        if vectors.len() != prompt_refs.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} prompts",
                vectors.len(),
                prompt_refs.len()
            )));
        }

        mean_pool(&vectors)
    }
}

/// Mean of a batch of vectors, re-normalized to unit length.
fn mean_pool(vectors: &[Vector]) -> Result<Vector> {
    let first = vectors
        .first()
        .ok_or_else(|| Error::Embedding("cannot pool an empty batch".to_string()))?;

    let mut sum = first.clone();
    for vector in &vectors[1..] {
        if vector.dim() != sum.dim() {
            return Err(Error::InvalidDimension {
                expected: sum.dim(),
                actual: vector.dim(),
            });
        }
        sum = &sum + vector;
    }

    let mut mean = &sum * (1.0 / vectors.len() as f32);
    mean.normalize();
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the prompts it was asked to embed and returns fixed axes.
    struct SpyEmbedder {
        seen: Mutex<Vec<String>>,
    }

    impl SpyEmbedder {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextEmbedder for SpyEmbedder {
        fn dim(&self) -> usize {
            3
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
            let mut seen = self.seen.lock().unwrap();
            seen.extend(texts.iter().map(|t| t.to_string()));
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let mut data = vec![0.0; 3];
                    data[i % 3] = 1.0;
                    Vector::new(data)
                })
                .collect())
        }
    }

    #[test]
    fn test_encode_builds_all_prompt_variants() {
        let encoder = QueryEncoder::new(SpyEmbedder::new());
        encoder.encode("itchy red patches").unwrap();

        let seen = encoder.embedder().seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                "a photo of a dog with itchy red patches".to_string(),
                "veterinary clinical image of itchy red patches".to_string(),
                "itchy red patches".to_string(),
            ]
        );
    }

    #[test]
    fn test_encode_returns_unit_vector() {
        let encoder = QueryEncoder::new(SpyEmbedder::new());
        let query = encoder.encode("flaky skin").unwrap();
        assert!(query.is_unit());
        // Mean of the three axes renormalized: equal weight on each axis.
        let expected = 1.0 / 3.0f32.sqrt();
        for component in query.as_slice() {
            assert!((component - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mean_pool_rejects_empty_batch() {
        assert!(mean_pool(&[]).is_err());
    }
}
