//! Supabase Storage backend
//!
//! Talks to the Storage REST API of a hosted Supabase project:
//!
//! - upload: `POST {url}/storage/v1/object/{bucket}/{path}` with `x-upsert`
//! - public URL: `{url}/storage/v1/object/public/{bucket}/{path}`
//! - health: `GET {url}/storage/v1/bucket/{bucket}`

use crate::keys::validate_object_path;
use crate::traits::{ObjectStorage, StorageError, StorageResult, UploadOptions};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by the Storage API.
#[derive(Debug, Deserialize)]
struct StorageApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client-facing message when the Storage API cannot be reached at all.
/// Transport errors name the project URL, so they are only logged.
const STORAGE_UNAVAILABLE: &str = "Storage service unavailable";

#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for SupabaseStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStorage")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SupabaseStorage {
    /// Create a client for the project at `base_url` (e.g. `https://xyz.supabase.co`).
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", self.api_key.as_str())
    }
}

/// Percent-encode each path segment, keeping the `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Pull the most useful message out of a failed Storage API response.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<StorageApiError>(body) {
        Ok(StorageApiError {
            message: Some(message),
            ..
        }) if !message.is_empty() => message,
        Ok(StorageApiError {
            error: Some(error), ..
        }) if !error.is_empty() => error,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Storage request failed with status {}", status),
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<()> {
        validate_object_path(path)?;

        let url = self.object_url(bucket, path);
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .authorized(self.client.post(&url))
            .header(header::CONTENT_TYPE, options.content_type.as_str())
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %path,
                    "Failed to reach Supabase storage"
                );
                StorageError::UploadFailed(STORAGE_UNAVAILABLE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::error!(
                status = %status,
                bucket = %bucket,
                key = %path,
                error = %message,
                "Supabase storage upload failed"
            );
            return Err(if status == StatusCode::CONFLICT {
                StorageError::AlreadyExists(message)
            } else {
                StorageError::UploadFailed(message)
            });
        }

        tracing::info!(
            bucket = %bucket,
            key = %path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Supabase storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }

    async fn health_check(&self, bucket: &str) -> StorageResult<()> {
        let url = format!(
            "{}/storage/v1/bucket/{}",
            self.base_url,
            urlencoding::encode(bucket)
        );
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StorageError::BackendError(error_message(status, &body)))
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}
