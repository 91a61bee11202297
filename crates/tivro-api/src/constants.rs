//! API constants.

/// Service name used in logs.
pub const SERVICE_NAME: &str = "tivro-api";

/// Upload endpoint path.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Served OpenAPI document path.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Value of the `Allow` header on 405 responses from the upload endpoint.
pub const UPLOAD_ALLOWED_METHODS: &str = "POST";
