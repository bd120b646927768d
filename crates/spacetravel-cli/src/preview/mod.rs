//! Persisted preview mode.

pub mod storage;

pub use storage::StoredPreview;
