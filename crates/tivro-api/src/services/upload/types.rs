//! Types used by the upload service

use bytes::Bytes;

/// A file that passed every check and may be written to storage.
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    pub data: Bytes,
    /// Filename as declared by the client.
    pub original_filename: String,
    pub content_type: String,
    pub extension: String,
}

impl ValidatedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
