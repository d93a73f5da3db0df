//! In-process service counters
//!
//! Feeds the vet-facing analytics view: how many diagnoses the service has
//! produced, how often each disease was predicted, and how many requests
//! failed. Service bookkeeping only; the classifier itself stays stateless.

use dermadx_core::Disease;
use parking_lot::RwLock;
use serde::Serialize;

#[derive(Default)]
struct Counters {
    total: u64,
    errors: u64,
    per_disease: [u64; Disease::COUNT],
}

/// Thread-safe diagnosis counters for one service process.
#[derive(Default)]
pub struct DiagnosisStats {
    counters: RwLock<Counters>,
}

/// Point-in-time view of the counters, as reported by `/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub errors: u64,
    pub predictions: Vec<PredictionCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionCount {
    pub disease: String,
    pub count: u64,
}

impl DiagnosisStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_prediction(&self, disease: Disease) {
        let mut counters = self.counters.write();
        counters.total += 1;
        counters.per_disease[disease.index()] += 1;
    }

    pub fn record_error(&self) {
        let mut counters = self.counters.write();
        counters.total += 1;
        counters.errors += 1;
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let counters = self.counters.read();
        StatsSnapshot {
            total_requests: counters.total,
            errors: counters.errors,
            predictions: Disease::ALL
                .iter()
                .map(|disease| PredictionCount {
                    disease: disease.as_str().to_string(),
                    count: counters.per_disease[disease.index()],
                })
                .collect(),
        }
    }
}
