//! # dermadx Core
//!
//! Core library for the dermadx diagnosis engine.
//!
//! This crate provides the fundamental data structures shared by the
//! classifier pipeline:
//!
//! - [`Vector`] - Dense vector representation with dot product and
//!   normalization
//! - [`Disease`] - The closed set of diagnosis labels
//! - [`VectorRecord`] / [`ReferenceStore`] - Immutable labeled reference
//!   embeddings
//! - [`ScoreMap`] - Per-class running scores for one classification pass
//!
//! ## Example
//!
//! ```rust
//! use dermadx_core::{Disease, ReferenceStore, ScoreMap, Vector, VectorRecord};
//!
//! let store = ReferenceStore::new(
//!     3,
//!     vec![VectorRecord::new(
//!         Vector::new(vec![1.0, 0.0, 0.0]),
//!         Disease::Ringworm,
//!     )],
//! )
//! .unwrap();
//!
//! let mut scores = ScoreMap::zeroed();
//! for record in store.records() {
//!     scores.add(record.label, 1.0);
//! }
//! let (winner, _) = scores.leader();
//! assert_eq!(winner, Disease::Ringworm);
//! ```

pub mod disease;
pub mod error;
pub mod record;
pub mod score;
pub mod vector;

pub use disease::Disease;
pub use error::{Error, Result};
pub use record::{ReferenceStore, VectorRecord};
pub use score::ScoreMap;
pub use vector::Vector;
