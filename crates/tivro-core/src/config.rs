//! Configuration module
//!
//! Environment-driven configuration for the upload API: server settings,
//! storage backend selection and upload limits.

use std::env;

use crate::constants::{DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES};
use crate::storage_types::{IdStrategy, StorageBackend};

const SERVER_PORT: u16 = 3000;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const STORAGE_TIMEOUT_SECS: u64 = 30;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    pub http_concurrency_limit: usize,
    pub log_json: bool,
}

/// Object storage settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub timeout_secs: u64,
}

/// Upload limits
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
    pub id_strategy: IdStrategy,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS)
                .max(1),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse::<StorageBackend>()?,
            Err(_) => StorageBackend::Supabase,
        };

        let storage = StorageConfig {
            backend,
            bucket: env::var("SUPABASE_STORAGE_BUCKET")
                .ok()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            supabase_url: env::var("SUPABASE_URL").ok(),
            supabase_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .or_else(|_| env::var("SUPABASE_ANON_KEY"))
                .ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            timeout_secs: env::var("STORAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(STORAGE_TIMEOUT_SECS),
        };

        let upload = UploadConfig {
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .map(|s| {
                    s.parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a valid number"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            id_strategy: match env::var("OBJECT_ID_STRATEGY") {
                Ok(value) => value.parse::<IdStrategy>()?,
                Err(_) => IdStrategy::default(),
            },
        };

        let config = Config {
            base,
            storage,
            upload,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on settings that would break uploads at request time.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be greater than 0"));
        }

        if self.storage.bucket.contains('/') {
            return Err(anyhow::anyhow!(
                "SUPABASE_STORAGE_BUCKET must not contain '/'"
            ));
        }

        match self.storage.backend {
            StorageBackend::Supabase => {
                let url = self.storage.supabase_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("SUPABASE_URL must be set when using the supabase backend")
                })?;
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_URL must be an http(s) URL"
                    ));
                }
                if self
                    .storage
                    .supabase_key
                    .as_deref()
                    .map(str::is_empty)
                    .unwrap_or(true)
                {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_SERVICE_ROLE_KEY must be set when using the supabase backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.storage.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.base.request_timeout_secs
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn log_json(&self) -> bool {
        self.base.log_json
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage.bucket
    }

    pub fn supabase_url(&self) -> Option<&str> {
        self.storage.supabase_url.as_deref()
    }

    pub fn supabase_key(&self) -> Option<&str> {
        self.storage.supabase_key.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.storage.local_storage_base_url.as_deref()
    }

    pub fn storage_timeout_secs(&self) -> u64 {
        self.storage.timeout_secs
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.upload.max_upload_bytes
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.upload.id_strategy
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> Config {
        Config {
            base: BaseConfig {
                server_port: 3000,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                request_timeout_secs: 60,
                http_concurrency_limit: 16,
                log_json: false,
            },
            storage: StorageConfig {
                backend: StorageBackend::Local,
                bucket: DEFAULT_BUCKET.to_string(),
                supabase_url: None,
                supabase_key: None,
                local_storage_path: Some("/tmp/tivro".to_string()),
                local_storage_base_url: Some("http://localhost:3000/files".to_string()),
                timeout_secs: 30,
            },
            upload: UploadConfig {
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                id_strategy: IdStrategy::Uuid,
            },
        }
    }

    #[test]
    fn local_config_is_valid() {
        assert!(local_config().validate().is_ok());
    }

    #[test]
    fn zero_upload_limit_is_rejected() {
        let mut config = local_config();
        config.upload.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn local_backend_requires_path() {
        let mut config = local_config();
        config.storage.local_storage_path = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn supabase_backend_requires_url_and_key() {
        let mut config = local_config();
        config.storage.backend = StorageBackend::Supabase;
        assert!(config.validate().is_err());

        config.storage.supabase_url = Some("ftp://project.supabase.co".to_string());
        config.storage.supabase_key = Some("service-role".to_string());
        assert!(config.validate().is_err());

        config.storage.supabase_url = Some("https://project.supabase.co".to_string());
        assert!(config.validate().is_ok());

        config.storage.supabase_key = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn bucket_with_slash_is_rejected() {
        let mut config = local_config();
        config.storage.bucket = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_detection() {
        let mut config = local_config();
        assert!(!config.is_production());
        config.base.environment = "Prod".to_string();
        assert!(config.is_production());
    }
}
