//! Store wrappers that fail on purpose.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;
use voiceguard_core::models::{AudioFile, AudioHistoryEntry};
use voiceguard_core::{AppError, StorageBackend};
use voiceguard_db::{AudioFileRepositoryTrait, HistoryRepositoryTrait, UserRepositoryTrait};
use voiceguard_storage::{Storage, StorageError, StorageResult};

/// Blob store whose writes always fail.
#[derive(Default)]
pub struct FailingStorage {
    pub put_calls: AtomicUsize,
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put(
        &self,
        _storage_key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::UploadFailed("connection reset by peer".to_string()))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn bucket(&self) -> &str {
        "failing"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Metadata store whose inserts always fail.
pub struct FailingAudioFileRepository;

#[async_trait]
impl AudioFileRepositoryTrait for FailingAudioFileRepository {
    async fn save(&self, _file: &AudioFile) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// User lookup that cannot reach its database.
pub struct FailingUserRepository;

#[async_trait]
impl UserRepositoryTrait for FailingUserRepository {
    async fn user_exists(&self, _user_id: Uuid) -> Result<bool, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// History store whose `create` fails; everything else goes to `inner`.
pub struct FailingHistoryRepository {
    pub inner: Arc<dyn HistoryRepositoryTrait>,
    pub create_calls: AtomicUsize,
}

impl FailingHistoryRepository {
    pub fn new(inner: Arc<dyn HistoryRepositoryTrait>) -> Self {
        Self {
            inner,
            create_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HistoryRepositoryTrait for FailingHistoryRepository {
    async fn create(&self, _entry: &AudioHistoryEntry) -> Result<(), AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AudioHistoryEntry>, AppError> {
        self.inner.list_by_user(user_id).await
    }

    async fn delete_by_id(&self, entry_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.inner.delete_by_id(entry_id, user_id).await
    }

    async fn clear_by_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.inner.clear_by_user(user_id).await
    }
}
