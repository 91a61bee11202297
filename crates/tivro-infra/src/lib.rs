//! Tivro Infrastructure Library
//!
//! Shared infrastructure for the Tivro HTTP services:
//! - Middleware (request ID, security headers, no-cache headers)
//! - Tracing initialization

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{no_cache_middleware, request_id_middleware, security_headers_middleware};
pub use telemetry::init_telemetry;
