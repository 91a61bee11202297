use crate::error::HttpAppError;
use axum::http::Uri;
use tivro_core::AppError;

/// Unknown paths get the same JSON error envelope as everything else.
pub async fn not_found(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("No route for {}", uri.path())))
}
