//! Blob store seam shared by the S3 and local backends

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use voiceguard_core::AppError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Blob store for uploaded audio.
///
/// Keys come from [`crate::keys::generate_audio_key`]. Backends only write
/// and probe; nothing in the upload path deletes a blob.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `storage_key` and return a URL for retrieving it.
    async fn put(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Bucket name the analysis service reads blobs from
    fn bucket(&self) -> &str;

    fn backend_type(&self) -> StorageBackend;
}
