//! # dermadx Embed
//!
//! Text embedding layer for the dermadx diagnosis engine.
//!
//! The embedding model itself is an external collaborator; this crate pins
//! down its contract and provides the pieces around it:
//!
//! - [`TextEmbedder`] - the embedder contract: fixed dimensionality, one
//!   unit-normalized vector per input text
//! - [`QueryEncoder`] - prompt ensembling: expand the symptom text into
//!   several prompt variants, embed, mean-pool, re-normalize
//! - [`HashEmbedder`] - deterministic feature-hashing fallback with no
//!   external service
//! - [`RemoteEmbedder`] - blocking HTTP client for an embedding service

pub mod embedder;
pub mod hashing;
pub mod prompt;
pub mod remote;

pub use embedder::TextEmbedder;
pub use hashing::{HashEmbedder, DEFAULT_HASH_DIM};
pub use prompt::QueryEncoder;
pub use remote::RemoteEmbedder;
