use tivro_core::constants::{ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES};
use tivro_core::{AppError, RejectReason, UploadVerdict};

use crate::signature::{sniff_mime, verify_signature, SNIFF_LEN};

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid content type: {content_type}")]
    InvalidContentType { content_type: String },

    #[error("Invalid file extension: {extension}")]
    InvalidExtension { extension: String },

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Signature does not match {mime} (detected: {detected:?})")]
    SignatureMismatch {
        mime: String,
        detected: Option<&'static str>,
    },
}

impl ValidationError {
    /// Collapse the detailed error into the client-facing rejection reason.
    pub fn reason(&self) -> RejectReason {
        match self {
            ValidationError::FileTooLarge { .. } | ValidationError::EmptyFile => {
                RejectReason::SizeNotAllowed
            }
            ValidationError::InvalidContentType { .. }
            | ValidationError::InvalidExtension { .. }
            | ValidationError::MissingExtension(_) => RejectReason::TypeNotAllowed,
            ValidationError::SignatureMismatch { .. } => RejectReason::SignatureMismatch,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Rejected(err.reason())
    }
}

/// Normalize MIME type by stripping parameters and case
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Lower-cased extension after the last `.`; `None` when the name has no dot
/// or nothing follows it.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.trim().rsplit_once('.')?;
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Upload validator
///
/// Declared metadata is checked against the allow-lists before any bytes are
/// read; size and signature checks run on the buffered content afterwards.
/// Declared metadata alone never accepts a file.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim().to_lowercase())
                .collect(),
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|c| normalize_mime_type(&c))
                .collect(),
        }
    }

    /// Validator with the standard image/PDF allow-lists.
    pub fn with_max_size(max_file_size: usize) -> Self {
        Self::new(
            max_file_size,
            ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ALLOWED_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate the declared content type; returns the normalized MIME type.
    pub fn validate_content_type(&self, content_type: &str) -> Result<String, ValidationError> {
        let normalized = normalize_mime_type(content_type);

        if !self.allowed_content_types.iter().any(|ct| ct == &normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
            });
        }

        Ok(normalized)
    }

    /// Validate the declared filename extension; returns the normalized extension.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = extension_of(filename)
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension { extension });
        }

        Ok(extension)
    }

    /// Validate declared metadata; returns `(mime, extension)`.
    pub fn validate_metadata(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(String, String), ValidationError> {
        let mime = self.validate_content_type(content_type)?;
        let extension = self.validate_extension(filename)?;
        Ok((mime, extension))
    }

    /// Check a running byte count against the ceiling; used while streaming.
    pub fn check_running_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validate the final file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        self.check_running_size(size)
    }

    /// Verify the leading bytes against the signature registered for `mime`.
    pub fn validate_signature(&self, mime: &str, data: &[u8]) -> Result<(), ValidationError> {
        if verify_signature(mime, data) {
            return Ok(());
        }

        let detected = sniff_mime(&data[..data.len().min(SNIFF_LEN)]);
        tracing::debug!(
            declared = %mime,
            detected = ?detected,
            "File signature does not match declared content type"
        );
        Err(ValidationError::SignatureMismatch {
            mime: mime.to_string(),
            detected,
        })
    }

    /// Run every check on a fully buffered file; returns `(mime, extension)`.
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(String, String), ValidationError> {
        let (mime, extension) = self.validate_metadata(filename, content_type)?;
        self.validate_file_size(data.len())?;
        self.validate_signature(&mime, data)?;
        Ok((mime, extension))
    }

    /// Same checks as [`validate_all`](Self::validate_all), as a verdict value.
    pub fn verdict(&self, filename: &str, content_type: &str, data: &[u8]) -> UploadVerdict {
        match self.validate_all(filename, content_type, data) {
            Ok((mime, extension)) => UploadVerdict::Accepted {
                mime,
                extension,
                signature_ok: true,
            },
            Err(e) => UploadVerdict::rejected(e.reason()),
        }
    }
}
