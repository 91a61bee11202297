//! Upload pipeline: extract, validate, store.

mod service;
mod types;

pub use service::UploadService;
