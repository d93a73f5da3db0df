//! Feature-hashing embedder
//!
//! A deterministic, dependency-free stand-in for the real embedding model.
//! Character trigrams and whole words are hashed into a fixed-dimension
//! vector, which is then unit-normalized. Similar phrasings share trigrams
//! and words, so they land near each other under cosine similarity. Used in
//! tests and in deployments that run without an embedding service.

use crate::embedder::TextEmbedder;
use dermadx_core::{Result, Vector};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default dimensionality of hashed embeddings
pub const DEFAULT_HASH_DIM: usize = 384;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn hash_text(&self, text: &str) -> Vector {
        let mut components = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            components[bucket(&trigram, self.dim)] += 1.0;
        }

        // Whole words carry more signal than any single trigram
        for word in normalized.split_whitespace() {
            components[bucket(&word, self.dim)] += 2.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIM)
    }
}

impl TextEmbedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.hash_text(text)).collect())
    }
}

fn bucket<T: Hash + ?Sized>(value: &T, dim: usize) -> usize {
    // DefaultHasher::new() is keyed with fixed constants, so buckets are
    // stable across runs and processes.
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() as usize) % dim
}

/// Character trigrams over the space-padded string
fn trigrams(s: &str) -> Vec<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return Vec::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
