#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use std::sync::Arc;
use tivro_api::setup::routes::setup_routes;
use tivro_api::AppState;
use tivro_core::constants::{DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES};
use tivro_core::{BaseConfig, Config, IdStrategy, StorageBackend, StorageConfig, UploadConfig};
use tivro_storage::{LocalStorage, ObjectStorage};

use self::storage::TestStorage;

pub const UPLOAD_PATH: &str = "/api/upload";

/// Test application backed by local storage in a temp directory
pub struct TestApp {
    pub server: TestServer,
    pub storage: TestStorage,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Bytes written for `path` in the default bucket.
    pub fn stored_bytes(&self, path: &str) -> Vec<u8> {
        std::fs::read(self.storage.object_path(DEFAULT_BUCKET, path))
            .expect("stored object should exist")
    }

    /// Number of objects written under the default bucket.
    pub fn stored_object_count(&self) -> usize {
        let bucket = self.storage.base_path.join(DEFAULT_BUCKET);
        if !bucket.exists() {
            return 0;
        }
        walk(&bucket)
    }
}

fn walk(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .expect("readable directory")
        .map(|entry| {
            let path = entry.expect("directory entry").path();
            if path.is_dir() {
                walk(&path)
            } else {
                1
            }
        })
        .sum()
}

pub fn test_config(storage: &TestStorage) -> Config {
    Config {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            request_timeout_secs: 30,
            http_concurrency_limit: 64,
            log_json: false,
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            bucket: DEFAULT_BUCKET.to_string(),
            supabase_url: None,
            supabase_key: None,
            local_storage_path: Some(storage.base_path_str()),
            local_storage_base_url: Some(storage.base_url.clone()),
            timeout_secs: 5,
        },
        upload: UploadConfig {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            id_strategy: IdStrategy::Uuid,
        },
    }
}

/// Setup a test application with local storage
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|state| state).await
}

/// Setup a test application, letting the caller adjust the state (id generator, limits).
pub async fn setup_test_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let storage = TestStorage::new();
    let local = LocalStorage::new(storage.base_path.clone(), storage.base_url.clone())
        .await
        .expect("Failed to create local storage");
    build(storage, Arc::new(local), configure).await
}

/// Setup a test application on top of an arbitrary storage backend.
pub async fn setup_test_app_with_storage(backend: Arc<dyn ObjectStorage>) -> TestApp {
    build(TestStorage::new(), backend, |state| state).await
}

async fn build(
    storage: TestStorage,
    backend: Arc<dyn ObjectStorage>,
    configure: impl FnOnce(AppState) -> AppState,
) -> TestApp {
    let config = test_config(&storage);
    let state = Arc::new(configure(AppState::new(config.clone(), backend)));
    let router = setup_routes(&config, state)
        .await
        .expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, storage }
}
