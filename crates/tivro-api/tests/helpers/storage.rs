use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tivro_core::StorageBackend;
use tivro_storage::{IdGenerator, ObjectStorage, StorageError, StorageResult, UploadOptions};

/// Test storage configuration.
pub struct TestStorage {
    pub temp_dir: TempDir,
    pub base_path: PathBuf,
    pub base_url: String,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let base_path = temp_dir.path().to_path_buf();
        let base_url = "http://localhost:3000/files".to_string();
        Self {
            temp_dir,
            base_path,
            base_url,
        }
    }

    pub fn base_path_str(&self) -> String {
        self.base_path.to_string_lossy().to_string()
    }

    pub fn object_path(&self, bucket: &str, path: &str) -> PathBuf {
        self.base_path.join(bucket).join(path)
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend whose writes and health checks always fail with a fixed message.
pub struct FailingStorage {
    pub message: String,
    pub attempts: AtomicUsize,
}

impl FailingStorage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload(
        &self,
        _bucket: &str,
        _path: &str,
        _data: Bytes,
        _options: UploadOptions,
    ) -> StorageResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::UploadFailed(self.message.clone()))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("http://unreachable.test/{}/{}", bucket, path)
    }

    async fn health_check(&self, _bucket: &str) -> StorageResult<()> {
        Err(StorageError::BackendError(self.message.clone()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}

/// Always hands out the same id, so a second upload targets an existing path.
pub struct FixedIdGenerator(pub &'static str);

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}
