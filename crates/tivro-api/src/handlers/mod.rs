pub mod fallback;
pub mod upload;
