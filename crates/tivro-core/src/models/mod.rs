pub mod upload;

pub use upload::{RejectReason, StoredObjectRef, UploadVerdict};
