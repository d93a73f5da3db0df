use crate::disease::Disease;
use crate::error::{Error, Result};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// A single labeled reference embedding.
///
/// Many records per disease are expected; each one is a different example
/// phrase embedded offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub vector: Vector,
    pub label: Disease,
}

impl VectorRecord {
    #[must_use]
    pub fn new(vector: Vector, label: Disease) -> Self {
        Self { vector, label }
    }
}

/// An immutable in-memory collection of reference records.
///
/// Loaded once at startup and read-only afterwards, so concurrent queries
/// need no locking. Record order is the load order and never changes; the
/// ranker relies on that for deterministic tie-breaks.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    records: Vec<VectorRecord>,
    dim: usize,
}

impl ReferenceStore {
    /// Build a store of `dim`-dimensional records.
    ///
    /// Every record must match `dim`; an empty record set is valid (the
    /// classifier then runs on keyword signal alone).
    pub fn new(dim: usize, records: Vec<VectorRecord>) -> Result<Self> {
        for record in &records {
            if record.vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: record.vector.dim(),
                });
            }
        }
        Ok(Self { records, dim })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// All records in stable load order.
    #[must_use]
    pub fn records(&self) -> &[VectorRecord] {
        &self.records
    }

    /// How many records carry the given label.
    #[must_use]
    pub fn count_label(&self, label: Disease) -> usize {
        self.records.iter().filter(|r| r.label == label).count()
    }
}
