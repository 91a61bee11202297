//! Upload limits and allow-lists.

/// Bucket used when `SUPABASE_STORAGE_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "uploads";

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Declared MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
];

/// Declared filename extensions accepted by the upload endpoint.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "pdf"];

/// Total body bytes of non-file form fields drained before the request is rejected.
pub const SKIPPED_FIELDS_MAX_BYTES: usize = 1024 * 1024;

/// Number of non-file form fields drained before the request is rejected.
pub const SKIPPED_FIELDS_MAX_COUNT: usize = 32;
