//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use tivro_core::Config;
use tivro_storage::{create_storage, ObjectStorage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ObjectStorage>> {
    tracing::info!("Initializing storage backend...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %config.storage_bucket(),
        "Storage backend initialized"
    );

    // An unreachable bucket is reported but does not block startup; readiness reflects it.
    if let Err(e) = storage.health_check(config.storage_bucket()).await {
        tracing::warn!(error = %e, "Storage health check failed at startup");
    }

    Ok(storage)
}
