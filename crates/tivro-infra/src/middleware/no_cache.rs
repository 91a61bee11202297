use axum::http::{header, HeaderMap, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};

/// Set headers that forbid caching of the response anywhere along the way.
pub fn apply_no_cache_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
}

/// No-cache middleware
/// Applied to API routes whose responses must always be fresh, errors included.
pub async fn no_cache_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_no_cache_headers(response.headers_mut());
    response
}
