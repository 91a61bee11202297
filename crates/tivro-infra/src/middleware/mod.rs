//! Shared HTTP middleware for Tivro services

pub mod no_cache;
pub mod request_id;
pub mod security_headers;

pub use no_cache::{apply_no_cache_headers, no_cache_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
