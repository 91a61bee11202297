//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tivro_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    UploadFailed(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Invalid storage path: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            // Backend messages are what the client sees on a failed write.
            StorageError::UploadFailed(msg)
            | StorageError::AlreadyExists(msg)
            | StorageError::BackendError(msg) => AppError::Storage(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Per-write options passed to [`ObjectStorage::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Replace an existing object at the same path. Uploads always pass `false`.
    pub upsert: bool,
}

impl UploadOptions {
    /// Options for a write-once upload.
    pub fn create_only(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            upsert: false,
        }
    }
}

/// Object storage abstraction
///
/// Backends are addressed by bucket + path and hand out public URLs. With
/// `upsert = false` an existing object must never be overwritten; the write
/// fails with [`StorageError::AlreadyExists`] instead.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `data` at `bucket/path`.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<()>;

    /// Publicly reachable URL for `bucket/path`.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Check that the backend (and the bucket) is reachable.
    async fn health_check(&self, bucket: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
