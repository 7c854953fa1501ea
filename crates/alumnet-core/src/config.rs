//! Configuration module
//!
//! Portal configuration is read from the environment (with `.env` support via
//! dotenvy). Every setting has a default so a portal can start with no
//! configuration at all, in which case uploads use the simulated store.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    MAX_UPLOAD_SIZE_BYTES, SIMULATED_LATENCY_MS, UPLOAD_MAX_RETRIES, UPLOAD_RETRY_DELAY_MS,
};
use crate::storage_types::StorageBackend;

const DEFAULT_EXTENSIONS: &str = "pdf,jpg,jpeg";
const DEFAULT_CONTENT_TYPES: &str = "application/pdf,image/jpeg";

/// Portal configuration
#[derive(Clone, Debug)]
pub struct PortalConfig {
    environment: String,
    // Storage configuration
    storage_backend: Option<StorageBackend>,
    local_storage_path: Option<String>,
    // Upload configuration
    max_upload_size_bytes: usize,
    document_allowed_extensions: Vec<String>,
    document_allowed_content_types: Vec<String>,
    upload_max_retries: u32,
    upload_retry_delay_ms: u64,
    simulated_latency_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage_backend: None,
            local_storage_path: None,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
            document_allowed_extensions: split_list(DEFAULT_EXTENSIONS),
            document_allowed_content_types: split_list(DEFAULT_CONTENT_TYPES),
            upload_max_retries: UPLOAD_MAX_RETRIES,
            upload_retry_delay_ms: UPLOAD_RETRY_DELAY_MS,
            simulated_latency_ms: SIMULATED_LATENCY_MS,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) if !value.trim().is_empty() => Some(StorageBackend::from_str(value.trim())?),
            _ => None,
        };

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .map(|v| {
                v.parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))
            })
            .transpose()?;

        let config = Self {
            environment,
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            max_upload_size_bytes: max_upload_size_mb
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.max_upload_size_bytes),
            document_allowed_extensions: env::var("DOCUMENT_ALLOWED_EXTENSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.document_allowed_extensions),
            document_allowed_content_types: env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.document_allowed_content_types),
            upload_max_retries: parse_var("UPLOAD_MAX_RETRIES", defaults.upload_max_retries)?,
            upload_retry_delay_ms: parse_var(
                "UPLOAD_RETRY_DELAY_MS",
                defaults.upload_retry_delay_ms,
            )?,
            simulated_latency_ms: parse_var("SIMULATED_LATENCY_MS", defaults.simulated_latency_ms)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_max_retries == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_RETRIES must be at least 1"));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        if self.document_allowed_extensions.is_empty()
            || self.document_allowed_content_types.is_empty()
        {
            return Err(anyhow::anyhow!(
                "DOCUMENT_ALLOWED_EXTENSIONS and DOCUMENT_ALLOWED_CONTENT_TYPES must not be empty"
            ));
        }
        if self.storage_backend == Some(StorageBackend::Local) && self.local_storage_path.is_none()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH is required when STORAGE_BACKEND=local"
            ));
        }
        Ok(())
    }

    /// Check if the portal is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.storage_backend = Some(backend);
        self
    }

    pub fn with_local_storage_path(mut self, path: impl Into<String>) -> Self {
        self.local_storage_path = Some(path.into());
        self
    }

    pub fn with_retry_policy(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.upload_max_retries = max_retries;
        self.upload_retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_simulated_latency_ms(mut self, latency_ms: u64) -> Self {
        self.simulated_latency_ms = latency_ms;
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn document_allowed_extensions(&self) -> &[String] {
        &self.document_allowed_extensions
    }

    pub fn document_allowed_content_types(&self) -> &[String] {
        &self.document_allowed_content_types
    }

    pub fn upload_max_retries(&self) -> u32 {
        self.upload_max_retries
    }

    pub fn upload_retry_delay(&self) -> Duration {
        Duration::from_millis(self.upload_retry_delay_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
