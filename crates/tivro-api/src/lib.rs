//! Tivro API Library
//!
//! HTTP surface of the upload validator: the multipart upload handler, its
//! error rendering and the router/server setup.

mod api_doc;
pub mod constants;
mod handlers;
mod services;
pub mod setup;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
