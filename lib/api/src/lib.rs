//! # dermadx API
//!
//! REST surface for the diagnosis engine: a prediction endpoint, a health
//! probe, and in-process analytics counters. The routing layer stays thin;
//! all decision logic lives in `dermadx-classifier`.

pub mod rest;
pub mod stats;

pub use rest::{AppState, RestApi};
pub use stats::{DiagnosisStats, StatsSnapshot};
