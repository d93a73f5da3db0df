//! # dermadx Storage
//!
//! Persistence for the reference store: gzip-compressed JSON snapshots,
//! produced offline and loaded once at startup. The loader drops records
//! whose label falls outside the known class set and fails on dimension
//! mismatches, so a bad snapshot can never poison the classifier.

pub mod snapshot;

pub use snapshot::{
    describe, load_store, save_store, LoadedStore, RecordData, SnapshotDescription,
    StoreSnapshotData,
};
