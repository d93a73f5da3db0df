//! Remote embedding service client
//!
//! Talks to an external embedding server over HTTP: the request carries a
//! batch of texts, the response one vector per text. The call is blocking;
//! callers that live on an async runtime must run it on a blocking pool.

use crate::embedder::TextEmbedder;
use dermadx_core::{Error, Result, Vector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    vectors: Vec<Vec<f32>>,
}

/// Client for an external embedding service.
pub struct RemoteEmbedder {
    endpoint: String,
    dim: usize,
    client: reqwest::blocking::Client,
}

impl RemoteEmbedder {
    /// Create a client for `endpoint`, expecting `dim`-dimensional vectors.
    pub fn new(endpoint: impl Into<String>, dim: usize, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Embedding(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            dim,
            client,
        })
    }
}

impl TextEmbedder for RemoteEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        debug!(count = texts.len(), endpoint = %self.endpoint, "requesting embeddings");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { texts })
            .send()
            .map_err(|e| Error::Embedding(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Embedding(format!(
                "embedding service returned HTTP {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .map_err(|e| Error::Embedding(format!("invalid embedding response: {e}")))?;

        if body.vectors.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "embedding service returned {} vectors for {} texts",
                body.vectors.len(),
                texts.len()
            )));
        }

        body.vectors
            .into_iter()
            .map(|data| {
                if data.len() != self.dim {
                    return Err(Error::InvalidDimension {
                        expected: self.dim,
                        actual: data.len(),
                    });
                }
                // The contract says unit vectors; renormalize in case the
                // service does not hold to it.
                Ok(Vector::new(data).normalized())
            })
            .collect()
    }
}
