use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tivro_core::{AppError, StoredObjectRef};
use utoipa::ToSchema;

/// Success envelope for an accepted upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always `true`
    pub ok: bool,
    pub data: StoredObjectRef,
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File validated and stored", body = UploadResponse),
        (status = 400, description = "Missing file, disallowed size or type, or bad signature", body = ErrorResponse),
        (status = 405, description = "Only POST is accepted", body = ErrorResponse),
        (status = 500, description = "Storage write failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart?;

    let stored = UploadService::new(&state).upload(multipart).await?;

    Ok(Json(UploadResponse {
        ok: true,
        data: stored,
    }))
}

/// Any method other than POST on the upload route.
pub async fn method_not_allowed() -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed)
}
