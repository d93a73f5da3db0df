//! # dermadx
//!
//! A dog skin condition diagnosis service: free-text symptom descriptions
//! go in, a disease label and a bounded confidence percentage come out.
//!
//! The classifier is a hybrid: embedding retrieval over a precomputed
//! reference store of labeled vectors, fused with a handcrafted
//! keyword-boost layer, then a deterministic decision policy.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! dermadx --snapshot ./data/reference.snapshot --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dermadx::prelude::*;
//! use std::sync::Arc;
//!
//! let embedder = Arc::new(HashEmbedder::new(128));
//! let store = Arc::new(ReferenceStore::new(128, Vec::new()).unwrap());
//!
//! let classifier = TextClassifier::new(
//!     store,
//!     embedder,
//!     Box::new(SubstringMatcher::builtin()),
//!     VotePolicy::TopKSum,
//! )
//! .unwrap();
//!
//! let diagnosis = classifier.classify("circular bald spot on the ear").unwrap();
//! println!("{} ({})", diagnosis.disease, diagnosis.confidence_label());
//! ```
//!
//! ## Crate Structure
//!
//! - [`dermadx-core`](https://docs.rs/dermadx-core) - Vectors, disease
//!   labels, reference store, score maps
//! - [`dermadx-embed`](https://docs.rs/dermadx-embed) - Embedder contract,
//!   query encoding, hashing and remote embedders
//! - [`dermadx-classifier`](https://docs.rs/dermadx-classifier) - Ranking,
//!   vote aggregation, keyword boosting, decision policy
//! - [`dermadx-storage`](https://docs.rs/dermadx-storage) - Snapshot
//!   persistence for the reference store
//! - [`dermadx-api`](https://docs.rs/dermadx-api) - REST API

// Re-export core types
pub use dermadx_core::{
    Disease, Error, ReferenceStore, Result, ScoreMap, Vector, VectorRecord,
};

// Re-export embedding layer
pub use dermadx_embed::{HashEmbedder, QueryEncoder, RemoteEmbedder, TextEmbedder};

// Re-export classifier
pub use dermadx_classifier::{
    Diagnosis, KeywordMatcher, Neighbor, SubstringMatcher, TextClassifier, VotePolicy,
};

// Re-export storage
pub use dermadx_storage::{load_store, save_store, LoadedStore, SnapshotDescription};

// Re-export API
pub use dermadx_api::{AppState, DiagnosisStats, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Diagnosis, Disease, Error, HashEmbedder, KeywordMatcher, ReferenceStore, Result,
        ScoreMap, SubstringMatcher, TextClassifier, TextEmbedder, Vector, VectorRecord,
        VotePolicy,
    };
}
