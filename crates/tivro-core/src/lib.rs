//! Tivro Core Library
//!
//! This crate provides the upload domain models, error types and configuration
//! shared by every Tivro component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{RejectReason, StoredObjectRef, UploadVerdict};
pub use storage_types::{IdStrategy, StorageBackend};
