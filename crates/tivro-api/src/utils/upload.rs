//! Multipart extraction for the upload endpoint

use axum::extract::multipart::{Field, Multipart, MultipartError};
use bytes::{Bytes, BytesMut};
use tivro_core::constants::{SKIPPED_FIELDS_MAX_BYTES, SKIPPED_FIELDS_MAX_COUNT};
use tivro_core::{AppError, RejectReason};
use tivro_processing::UploadValidator;

/// The single file part of an upload request.
///
/// Declared metadata has passed the allow-lists and the body is within the
/// size ceiling; size floor and signature are still unchecked.
#[derive(Debug)]
pub struct ExtractedFile {
    pub filename: String,
    pub mime: String,
    pub extension: String,
    pub data: Bytes,
}

/// A malformed multipart stream carries no usable file.
fn stream_error(err: MultipartError) -> AppError {
    tracing::debug!(error = %err.body_text(), "Multipart stream error");
    AppError::Rejected(RejectReason::MissingFile)
}

/// Running totals for the non-file fields of one form.
#[derive(Debug, Default)]
struct SkippedFields {
    count: usize,
    bytes: usize,
}

impl SkippedFields {
    /// Read a text field to its end without keeping it.
    ///
    /// These caps are separate from the file ceiling, so form data sent
    /// alongside a file never counts against the file's size.
    async fn drain(&mut self, mut field: Field<'_>) -> Result<(), AppError> {
        self.count += 1;
        if self.count > SKIPPED_FIELDS_MAX_COUNT {
            tracing::debug!(count = self.count, "Too many form fields");
            return Err(AppError::Rejected(RejectReason::SizeNotAllowed));
        }

        while let Some(chunk) = field.chunk().await.map_err(stream_error)? {
            self.bytes += chunk.len();
            if self.bytes > SKIPPED_FIELDS_MAX_BYTES {
                tracing::debug!(bytes = self.bytes, "Form fields exceed their size cap");
                return Err(AppError::Rejected(RejectReason::SizeNotAllowed));
            }
        }
        Ok(())
    }
}

/// Extract exactly one file part from the form, streaming its body.
///
/// Parts without a filename are text fields; they are drained and dropped
/// under their own caps. The declared type is checked before any file bytes
/// are read, and reading stops as soon as the running size passes the limit,
/// so an oversized body is never buffered in full. A second file part rejects the request as missing file.
pub async fn extract_single_file(
    mut multipart: Multipart,
    validator: &UploadValidator,
) -> Result<ExtractedFile, AppError> {
    let mut extracted: Option<ExtractedFile> = None;
    let mut skipped = SkippedFields::default();

    while let Some(mut field) = multipart.next_field().await.map_err(stream_error)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            skipped.drain(field).await?;
            continue;
        };

        if extracted.is_some() {
            tracing::debug!(filename = %filename, "Rejecting request with more than one file part");
            return Err(AppError::Rejected(RejectReason::MissingFile));
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let (mime, extension) = validator.validate_metadata(&filename, &content_type)?;

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(stream_error)? {
            validator.check_running_size(buffer.len() + chunk.len())?;
            buffer.extend_from_slice(&chunk);
        }

        extracted = Some(ExtractedFile {
            filename,
            mime,
            extension,
            data: buffer.freeze(),
        });
    }

    extracted.ok_or(AppError::Rejected(RejectReason::MissingFile))
}
