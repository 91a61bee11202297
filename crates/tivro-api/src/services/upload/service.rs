//! Upload service
//!
//! Pipeline: extract → validate → store. Every check runs before the single
//! storage write; a rejected file never reaches the backend.

use std::sync::Arc;

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use tivro_core::{AppError, StoredObjectRef, UploadVerdict};
use tivro_storage::{build_object_path, UploadOptions};

use crate::state::AppState;
use crate::utils::upload::{extract_single_file, ExtractedFile};

use super::types::ValidatedFile;

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete upload workflow for one multipart request.
    pub async fn upload(&self, multipart: Multipart) -> Result<StoredObjectRef, AppError> {
        let extracted = extract_single_file(multipart, &self.state.validator).await?;
        let validated = self.validate(extracted)?;
        self.store(validated, Utc::now()).await
    }

    /// Full verdict on the buffered file: size floor/ceiling and magic bytes
    /// against the declared MIME type, on top of the metadata checks.
    fn validate(&self, file: ExtractedFile) -> Result<ValidatedFile, AppError> {
        let verdict = self
            .state
            .validator
            .verdict(&file.filename, &file.mime, &file.data);

        match verdict {
            UploadVerdict::Accepted {
                mime, extension, ..
            } => Ok(ValidatedFile {
                data: file.data,
                original_filename: file.filename,
                content_type: mime,
                extension,
            }),
            UploadVerdict::Rejected { reason } => Err(AppError::Rejected(reason)),
        }
    }

    /// Write the file under a fresh date-partitioned path, never overwriting.
    async fn store(
        &self,
        file: ValidatedFile,
        uploaded_at: DateTime<Utc>,
    ) -> Result<StoredObjectRef, AppError> {
        let bucket = self.state.bucket();
        let id = self.state.id_generator.generate();
        let path = build_object_path(uploaded_at, &id, &file.extension);
        let size = file.size();

        tracing::debug!(
            bucket = %bucket,
            path = %path,
            content_type = %file.content_type,
            size_bytes = size,
            "Uploading validated file"
        );

        self.state
            .storage
            .upload(
                bucket,
                &path,
                file.data,
                UploadOptions::create_only(file.content_type.as_str()),
            )
            .await?;

        let url = self.state.storage.public_url(bucket, &path);

        tracing::info!(
            path = %path,
            content_type = %file.content_type,
            size_bytes = size,
            original_filename = %file.original_filename,
            backend = %self.state.storage.backend_type(),
            "File uploaded"
        );

        Ok(StoredObjectRef {
            url,
            path,
            mime: file.content_type,
            size,
            filename: file.original_filename,
        })
    }
}
