//! Backend selection from configuration.

use std::sync::Arc;

use voiceguard_core::Config;

#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};

/// Build the blob store named by `STORAGE_BACKEND`, S3 when unset.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::S3);
    tracing::debug!(backend = %backend, "Creating storage backend");

    match backend {
        StorageBackend::S3 => s3_backend(config).await,
        StorageBackend::Local => local_backend(config).await,
    }
}

#[allow(dead_code)]
fn required<'a>(value: Option<&'a str>, name: &str) -> StorageResult<&'a str> {
    value.ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
}

#[allow(dead_code)]
fn unavailable(backend: StorageBackend, feature: &str) -> StorageError {
    StorageError::ConfigError(format!(
        "{} storage backend not available ({} feature not enabled)",
        backend, feature
    ))
}

#[cfg(feature = "storage-s3")]
async fn s3_backend(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = required(config.s3_bucket(), "S3_BUCKET")?;
    let region = required(
        config.s3_region().or(config.aws_region()),
        "S3_REGION or AWS_REGION",
    )?;

    let storage = S3Storage::new(
        bucket.to_string(),
        region.to_string(),
        config.s3_endpoint().map(String::from),
    )
    .await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
async fn s3_backend(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(unavailable(StorageBackend::S3, "storage-s3"))
}

#[cfg(feature = "storage-local")]
async fn local_backend(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let base_path = required(config.local_storage_path(), "LOCAL_STORAGE_PATH")?;

    let storage = LocalStorage::new(
        base_path.to_string(),
        config.local_storage_base_url().map(String::from),
    )
    .await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
async fn local_backend(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(unavailable(StorageBackend::Local, "storage-local"))
}
