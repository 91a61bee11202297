//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tivro_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tivro Upload API",
        version = "0.1.0",
        description = "Validates a single multipart file (declared type, size, magic bytes) and stores it under a date-partitioned path in object storage."
    ),
    paths(handlers::upload::upload_file),
    components(schemas(
        handlers::upload::UploadResponse,
        error::ErrorResponse,
        models::StoredObjectRef,
        models::RejectReason,
    )),
    tags(
        (name = "uploads", description = "File upload")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
