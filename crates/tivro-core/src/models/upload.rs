//! Upload domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Why an upload was refused. Every reason is terminal for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// No file part, more than one file part, or a body that is not multipart.
    MissingFile,
    /// Empty file or a file larger than the configured ceiling.
    SizeNotAllowed,
    /// Declared MIME type or extension outside the allow-list.
    TypeNotAllowed,
    /// Leading bytes do not match the declared MIME type.
    SignatureMismatch,
}

impl RejectReason {
    /// Client-facing message, returned verbatim in the `error` field.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::MissingFile => "Missing file",
            RejectReason::SizeNotAllowed => "File size not allowed",
            RejectReason::TypeNotAllowed => "File type not allowed",
            RejectReason::SignatureMismatch => "Invalid file signature",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingFile => "MISSING_FILE",
            RejectReason::SizeNotAllowed => "FILE_SIZE_NOT_ALLOWED",
            RejectReason::TypeNotAllowed => "FILE_TYPE_NOT_ALLOWED",
            RejectReason::SignatureMismatch => "INVALID_FILE_SIGNATURE",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of validating one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadVerdict {
    Accepted {
        mime: String,
        extension: String,
        signature_ok: bool,
    },
    Rejected {
        reason: RejectReason,
    },
}

impl UploadVerdict {
    pub fn rejected(reason: RejectReason) -> Self {
        UploadVerdict::Rejected { reason }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            UploadVerdict::Accepted { .. } => None,
            UploadVerdict::Rejected { reason } => Some(*reason),
        }
    }
}

/// Reference to an object written to storage by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredObjectRef {
    /// Public retrieval URL.
    pub url: String,
    /// `YYYY-MM-DD/<id>.<ext>` inside the bucket.
    pub path: String,
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
    /// Filename as declared by the client.
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_messages_are_stable() {
        assert_eq!(RejectReason::MissingFile.message(), "Missing file");
        assert_eq!(RejectReason::SizeNotAllowed.message(), "File size not allowed");
        assert_eq!(RejectReason::TypeNotAllowed.message(), "File type not allowed");
        assert_eq!(
            RejectReason::SignatureMismatch.message(),
            "Invalid file signature"
        );
    }

    #[test]
    fn verdict_exposes_reason() {
        let verdict = UploadVerdict::rejected(RejectReason::SignatureMismatch);
        assert_eq!(verdict.reject_reason(), Some(RejectReason::SignatureMismatch));

        let accepted = UploadVerdict::Accepted {
            mime: "image/png".to_string(),
            extension: "png".to_string(),
            signature_ok: true,
        };
        assert_eq!(accepted.reject_reason(), None);
    }

    #[test]
    fn stored_object_ref_serializes_flat() {
        let object = StoredObjectRef {
            url: "https://cdn.example/uploads/2024-05-01/abc.png".to_string(),
            path: "2024-05-01/abc.png".to_string(),
            mime: "image/png".to_string(),
            size: 42,
            filename: "logo.png".to_string(),
        };
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["path"], "2024-05-01/abc.png");
        assert_eq!(json["size"], 42);
        assert_eq!(json["filename"], "logo.png");
    }
}
