//! Object path generation shared by all storage backends.
//!
//! Path format: `YYYY-MM-DD/{id}.{ext}` where the date is the UTC upload date.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use tivro_core::IdStrategy;

use crate::traits::{StorageError, StorageResult};

/// Source of per-object identifiers.
///
/// Ids must be unique per call; two uploads on the same day with the same
/// filename still get distinct paths.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 ids, backed by the OS CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Wall-clock nanos + a process-wide counter + a pseudo-random suffix.
///
/// For targets without a secure random source. The counter keeps ids unique
/// within the process even when the clock does not advance between calls.
#[derive(Debug, Default)]
pub struct FallbackIdGenerator {
    counter: AtomicU64,
}

impl FallbackIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for FallbackIdGenerator {
    fn generate(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let noise: u32 = rand::random();
        format!("{:x}-{:x}-{:08x}", nanos, seq, noise)
    }
}

/// The id generator selected by configuration.
pub fn id_generator_for(strategy: IdStrategy) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Arc::new(UuidIdGenerator),
        IdStrategy::Fallback => Arc::new(FallbackIdGenerator::new()),
    }
}

/// Build the object path for an upload made at `uploaded_at`.
pub fn build_object_path(uploaded_at: DateTime<Utc>, id: &str, extension: &str) -> String {
    format!("{}/{}.{}", uploaded_at.format("%Y-%m-%d"), id, extension)
}

/// Reject paths that could escape the bucket.
pub fn validate_object_path(path: &str) -> StorageResult<()> {
    if path.is_empty() {
        return Err(StorageError::InvalidKey("empty path".to_string()));
    }
    if path.contains("..") || path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage path contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
