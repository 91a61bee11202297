//! Tivro Storage Library
//!
//! Object storage abstraction for uploaded files, with a Supabase Storage REST
//! backend and a local filesystem backend.
//!
//! # Object path format
//!
//! Objects live inside a bucket at `YYYY-MM-DD/{id}.{ext}`: the UTC upload
//! date, a collision-resistant id from an [`IdGenerator`], and the validated
//! extension. Paths must not contain `..` or a leading `/`. Path generation is
//! centralized in the `keys` module so every backend sees the same layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-supabase")]
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{
    build_object_path, id_generator_for, validate_object_path, FallbackIdGenerator, IdGenerator,
    UuidIdGenerator,
};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-supabase")]
pub use supabase::SupabaseStorage;
pub use tivro_core::StorageBackend;
pub use traits::{ObjectStorage, StorageError, StorageResult, UploadOptions};
