// Snapshot persistence for the reference store
use chrono::{DateTime, Utc};
use dermadx_core::{Disease, Error, ReferenceStore, Result, Vector, VectorRecord};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::warn;

/// Snapshot description for logs and the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDescription {
    pub name: String,
    pub creation_time: Option<String>,
    pub size: u64,
    pub checksum: String,
    pub record_count: usize,
    pub dim: usize,
}

/// On-disk snapshot payload: the full reference store plus its metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSnapshotData {
    pub dim: usize,
    pub created_at: u64,
    pub records: Vec<RecordData>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordData {
    pub label: String,
    pub vector: Vec<f32>,
}

/// Result of loading a snapshot into memory.
pub struct LoadedStore {
    pub store: ReferenceStore,
    /// Records dropped because their label is not in the known class set.
    pub skipped: usize,
}

/// Write `store` as a gzip-compressed JSON snapshot at `path`.
pub fn save_store(store: &ReferenceStore, path: &Path) -> Result<SnapshotDescription> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = StoreSnapshotData {
        dim: store.dim(),
        created_at: Utc::now().timestamp() as u64,
        records: store
            .records()
            .iter()
            .map(|record| RecordData {
                label: record.label.as_str().to_string(),
                vector: record.vector.as_slice().to_vec(),
            })
            .collect(),
    };

    let json_data =
        serde_json::to_vec(&data).map_err(|e| Error::Serialization(e.to_string()))?;

    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    encoder.write_all(&json_data)?;
    encoder.finish()?;

    describe(path, data.records.len(), data.dim)
}

/// Load a snapshot from `path` into an immutable [`ReferenceStore`].
///
/// Records whose label is outside the class set are skipped with a warning;
/// a record whose vector length disagrees with the snapshot's declared
/// dimensionality fails the whole load. Vectors that are not unit length
/// are re-normalized on the way in.
pub fn load_store(path: &Path) -> Result<LoadedStore> {
    let data = read_snapshot(path)?;

    let mut records = Vec::with_capacity(data.records.len());
    let mut skipped = 0usize;

    for record in data.records {
        let label: Disease = match record.label.parse() {
            Ok(label) => label,
            Err(_) => {
                warn!(label = %record.label, "skipping record with unknown label");
                skipped += 1;
                continue;
            }
        };

        if record.vector.len() != data.dim {
            return Err(Error::InvalidDimension {
                expected: data.dim,
                actual: record.vector.len(),
            });
        }

        let mut vector = Vector::new(record.vector);
        if !vector.is_unit() {
            vector.normalize();
        }
        records.push(VectorRecord::new(vector, label));
    }

    if skipped > 0 {
        warn!(skipped, "snapshot contained records outside the class set");
    }

    let store = ReferenceStore::new(data.dim, records)?;
    Ok(LoadedStore { store, skipped })
}

/// Describe the snapshot file at `path` without loading it into a store.
pub fn describe(path: &Path, record_count: usize, dim: usize) -> Result<SnapshotDescription> {
    let file_data = fs::read(path)?;
    let checksum = format!("{:x}", Sha256::digest(&file_data));

    let metadata = fs::metadata(path)?;
    let creation_time = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .and_then(|d| {
            DateTime::from_timestamp(d.as_secs() as i64, 0)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        });

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("snapshot")
        .to_string();

    Ok(SnapshotDescription {
        name,
        creation_time,
        size: metadata.len(),
        checksum,
        record_count,
        dim,
    })
}

fn read_snapshot(path: &Path) -> Result<StoreSnapshotData> {
    if !path.exists() {
        return Err(Error::Unavailable(format!(
            "snapshot {} does not exist",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut json_data = Vec::new();
    decoder.read_to_end(&mut json_data)?;

    serde_json::from_slice(&json_data).map_err(|e| Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ReferenceStore {
        ReferenceStore::new(
            3,
            vec![
                VectorRecord::new(Vector::new(vec![1.0, 0.0, 0.0]), Disease::Ringworm),
                VectorRecord::new(Vector::new(vec![0.0, 1.0, 0.0]), Disease::Healthy),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.snapshot");

        let description = save_store(&sample_store(), &path).unwrap();
        assert_eq!(description.record_count, 2);
        assert_eq!(description.dim, 3);
        assert!(!description.checksum.is_empty());

        let loaded = load_store(&path).unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.store.len(), 2);
        assert_eq!(loaded.store.dim(), 3);
        assert_eq!(loaded.store.records()[0].label, Disease::Ringworm);
        assert_eq!(
            loaded.store.records()[0].vector.as_slice(),
            &[1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_load_skips_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.snapshot");

        let data = StoreSnapshotData {
            dim: 2,
            created_at: 0,
            records: vec![
                RecordData {
                    label: "ringworm".to_string(),
                    vector: vec![1.0, 0.0],
                },
                RecordData {
                    label: "Scabies".to_string(),
                    vector: vec![0.0, 1.0],
                },
            ],
        };
        write_raw(&path, &data);

        let loaded = load_store(&path).unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.store.len(), 1);
        assert_eq!(loaded.store.records()[0].label, Disease::Ringworm);
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.snapshot");

        let data = StoreSnapshotData {
            dim: 3,
            created_at: 0,
            records: vec![RecordData {
                label: "Healthy".to_string(),
                vector: vec![1.0, 0.0],
            }],
        };
        write_raw(&path, &data);

        assert!(matches!(
            load_store(&path),
            Err(Error::InvalidDimension {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_load_normalizes_non_unit_vectors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.snapshot");

        let data = StoreSnapshotData {
            dim: 2,
            created_at: 0,
            records: vec![RecordData {
                label: "Dermatitis".to_string(),
                vector: vec![3.0, 4.0],
            }],
        };
        write_raw(&path, &data);

        let loaded = load_store(&path).unwrap();
        let vector = &loaded.store.records()[0].vector;
        assert!(vector.is_unit());
    }

    #[test]
    fn test_missing_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.snapshot");
        assert!(matches!(load_store(&path), Err(Error::Unavailable(_))));
    }

    fn write_raw(path: &Path, data: &StoreSnapshotData) {
        let json = serde_json::to_vec(data).unwrap();
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(&json).unwrap();
        encoder.finish().unwrap();
    }
}
