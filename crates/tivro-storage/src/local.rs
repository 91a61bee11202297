use crate::keys::validate_object_path;
use crate::traits::{ObjectStorage, StorageError, StorageResult, UploadOptions};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects are written to `{base_path}/{bucket}/{path}` and served from
/// `{base_url}/{bucket}/{path}`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/tivro/files")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Resolve bucket + path to a filesystem path inside the storage root.
    fn object_path(&self, bucket: &str, path: &str) -> StorageResult<PathBuf> {
        validate_object_path(bucket)?;
        if bucket.contains('/') {
            return Err(StorageError::InvalidKey(
                "Bucket name contains invalid characters".to_string(),
            ));
        }
        validate_object_path(path)?;
        Ok(self.base_path.join(bucket).join(path))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<()> {
        let file_path = self.object_path(bucket, path)?;
        let size = data.len();

        self.ensure_parent_dir(&file_path).await?;

        let start = std::time::Instant::now();

        let mut open = fs::OpenOptions::new();
        open.write(true);
        if options.upsert {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }

        let mut file = open.open(&file_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                StorageError::AlreadyExists("The resource already exists".to_string())
            } else {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    file_path.display(),
                    e
                ))
            }
        })?;

        let written = async {
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            // Never leave a partially written object behind.
            drop(file);
            let _ = fs::remove_file(&file_path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                file_path.display(),
                e
            )));
        }

        tracing::info!(
            path = %file_path.display(),
            bucket = %bucket,
            key = %path,
            content_type = %options.content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), bucket, path)
    }

    async fn health_check(&self, _bucket: &str) -> StorageResult<()> {
        if fs::try_exists(&self.base_path).await? {
            Ok(())
        } else {
            Err(StorageError::BackendError(format!(
                "Storage directory {} is missing",
                self.base_path.display()
            )))
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:3000/files/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_writes_exact_bytes() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let data = Bytes::from_static(b"%PDF-1.4 test");

        storage
            .upload(
                "uploads",
                "2024-01-01/abc.pdf",
                data.clone(),
                UploadOptions::create_only("application/pdf"),
            )
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("uploads/2024-01-01/abc.pdf")).unwrap();
        assert_eq!(written, data.to_vec());
    }

    #[tokio::test]
    async fn test_create_only_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload(
                "uploads",
                "2024-01-01/a.png",
                Bytes::from_static(b"first"),
                UploadOptions::create_only("image/png"),
            )
            .await
            .unwrap();

        let result = storage
            .upload(
                "uploads",
                "2024-01-01/a.png",
                Bytes::from_static(b"second"),
                UploadOptions::create_only("image/png"),
            )
            .await;
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        let written = std::fs::read(dir.path().join("uploads/2024-01-01/a.png")).unwrap();
        assert_eq!(written, b"first");
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let options = UploadOptions {
            content_type: "image/png".to_string(),
            upsert: true,
        };

        storage
            .upload("uploads", "x.png", Bytes::from_static(b"one"), options.clone())
            .await
            .unwrap();
        storage
            .upload("uploads", "x.png", Bytes::from_static(b"two"), options)
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("uploads/x.png")).unwrap();
        assert_eq!(written, b"two");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let result = storage
            .upload(
                "uploads",
                "../../etc/passwd",
                Bytes::from_static(b"x"),
                UploadOptions::create_only("text/plain"),
            )
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .upload(
                "../uploads",
                "a.png",
                Bytes::from_static(b"x"),
                UploadOptions::create_only("image/png"),
            )
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_public_url_and_health() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        assert_eq!(
            storage.public_url("uploads", "2024-01-01/a.png"),
            "http://localhost:3000/files/uploads/2024-01-01/a.png"
        );
        assert!(storage.health_check("uploads").await.is_ok());
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
