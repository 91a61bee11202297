//! Tivro upload validation
//!
//! Allow-list checks on declared metadata, size bounds, and magic-byte
//! signature verification for uploaded files.

pub mod signature;
pub mod validator;

pub use signature::{signature_for, sniff_mime, verify_signature, Signature, SIGNATURES};
pub use validator::{extension_of, normalize_mime_type, UploadValidator, ValidationError};
