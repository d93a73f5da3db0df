//! # dermadx Classifier
//!
//! The hybrid text-to-diagnosis pipeline: embedding retrieval fused with a
//! rule-based keyword layer.
//!
//! Stages, in order:
//!
//! - [`rank`](rank::rank) - linear-scan cosine ranking of the reference
//!   store against the query vector
//! - [`aggregate`](aggregate::aggregate) - neighbor votes folded into
//!   per-class scores under a [`VotePolicy`]
//! - [`apply_keyword_boost`](boost::apply_keyword_boost) /
//!   [`dampen_uncorroborated_ringworm`](boost::dampen_uncorroborated_ringworm) -
//!   keyword-rule adjustments, independent of the embedding signal
//! - [`decide`](decide::decide) - winner selection and bounded confidence
//!
//! [`TextClassifier`] wires these into a single stateless pass per request.
//!
//! ## Example
//!
//! ```rust
//! use dermadx_classifier::{SubstringMatcher, TextClassifier, VotePolicy};
//! use dermadx_core::{Disease, ReferenceStore};
//! use dermadx_embed::HashEmbedder;
//! use std::sync::Arc;
//!
//! let embedder = Arc::new(HashEmbedder::new(128));
//! let store = Arc::new(ReferenceStore::new(128, Vec::new()).unwrap());
//! let classifier = TextClassifier::new(
//!     store,
//!     embedder,
//!     Box::new(SubstringMatcher::builtin()),
//!     VotePolicy::TopKSum,
//! )
//! .unwrap();
//!
//! let diagnosis = classifier.classify("red inflamed hot spot").unwrap();
//! assert_eq!(diagnosis.disease, Disease::Dermatitis);
//! ```

pub mod aggregate;
pub mod boost;
pub mod decide;
pub mod keywords;
pub mod pipeline;
pub mod rank;

pub use aggregate::{aggregate, VotePolicy, TOP_K};
pub use boost::{apply_keyword_boost, dampen_uncorroborated_ringworm};
pub use decide::{decide, Diagnosis, MAX_CONFIDENCE};
pub use keywords::{KeywordMatcher, SubstringMatcher};
pub use pipeline::TextClassifier;
pub use rank::{rank, Neighbor};
