use dermadx_core::{Result, Vector};

/// The external text embedding model, seen as a pure function.
///
/// Implementations map each input string to one unit-L2-normalized vector of
/// a fixed dimensionality that never changes for the life of the instance.
/// They hold no per-call state, so a single instance can serve concurrent
/// requests.
pub trait TextEmbedder: Send + Sync {
    /// Dimensionality of every vector this embedder produces.
    fn dim(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vector> {
        let mut vectors = self.embed_batch(&[text])?;
        vectors.pop().ok_or_else(|| {
            dermadx_core::Error::Embedding("embedder returned no vector".to_string())
        })
    }
}

impl<T: TextEmbedder + ?Sized> TextEmbedder for std::sync::Arc<T> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        (**self).embed_batch(texts)
    }
}
