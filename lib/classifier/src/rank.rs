//! Retrieval ranker
//!
//! Scores every reference record against the query with a full linear scan
//! and orders them by similarity. No approximate index: the store is small
//! and static, and an exhaustive scan keeps results exactly reproducible.

use dermadx_core::{Disease, ReferenceStore, Vector};

/// One scored reference record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub similarity: f32,
    pub label: Disease,
}

/// Rank all store records against `query` by descending similarity.
///
/// Similarity is the dot product of the unit-norm query and record vectors,
/// i.e. cosine similarity. The sort is stable, so records with equal
/// similarity keep their store order and tie-breaks are deterministic.
#[must_use]
pub fn rank(query: &Vector, store: &ReferenceStore) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = store
        .records()
        .iter()
        .map(|record| Neighbor {
            similarity: query.dot(&record.vector),
            label: record.label,
        })
        .collect();

    neighbors.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use dermadx_core::VectorRecord;

    fn store(records: Vec<(Vec<f32>, Disease)>) -> ReferenceStore {
        let dim = records.first().map_or(2, |(v, _)| v.len());
        ReferenceStore::new(
            dim,
            records
                .into_iter()
                .map(|(data, label)| VectorRecord::new(Vector::new(data), label))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rank_orders_by_descending_similarity() {
        let store = store(vec![
            (vec![0.0, 1.0], Disease::Healthy),
            (vec![1.0, 0.0], Disease::Ringworm),
            (vec![0.6, 0.8], Disease::Dermatitis),
        ]);
        let query = Vector::new(vec![1.0, 0.0]);

        let ranked = rank(&query, &store);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, Disease::Ringworm);
        assert_eq!(ranked[1].label, Disease::Dermatitis);
        assert_eq!(ranked[2].label, Disease::Healthy);
    }

    #[test]
    fn test_rank_ties_keep_store_order() {
        let store = store(vec![
            (vec![1.0, 0.0], Disease::Demodicosis),
            (vec![1.0, 0.0], Disease::Hypersensitivity),
            (vec![1.0, 0.0], Disease::Dermatitis),
        ]);
        let query = Vector::new(vec![1.0, 0.0]);

        let ranked = rank(&query, &store);
        let labels: Vec<Disease> = ranked.iter().map(|n| n.label).collect();
        assert_eq!(
            labels,
            vec![
                Disease::Demodicosis,
                Disease::Hypersensitivity,
                Disease::Dermatitis
            ]
        );
    }

    #[test]
    fn test_rank_empty_store() {
        let store = ReferenceStore::new(2, Vec::new()).unwrap();
        let query = Vector::new(vec![1.0, 0.0]);
        assert!(rank(&query, &store).is_empty());
    }
}
