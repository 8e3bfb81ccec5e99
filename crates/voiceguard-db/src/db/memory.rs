//! In-memory repositories.
//!
//! Same contracts as the Postgres adapters, backed by `tokio::sync::RwLock`
//! collections. State lives only as long as the repository value.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;
use uuid::Uuid;
use voiceguard_core::models::{AudioFile, AudioHistoryEntry};
use voiceguard_core::AppError;

use super::audio_file::AudioFileRepositoryTrait;
use super::history::{HistoryRepositoryTrait, HISTORY_NOT_FOUND_MESSAGE};
use super::user::UserRepositoryTrait;

#[derive(Default)]
pub struct InMemoryAudioFileRepository {
    files: RwLock<HashMap<Uuid, AudioFile>>,
}

impl InMemoryAudioFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: Uuid) -> Option<AudioFile> {
        self.files.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AudioFileRepositoryTrait for InMemoryAudioFileRepository {
    async fn save(&self, file: &AudioFile) -> Result<(), AppError> {
        let mut files = self.files.write().await;
        if files.contains_key(&file.id) {
            return Err(AppError::BadRequest(format!(
                "Audio file {} already exists",
                file.id
            )));
        }
        files.insert(file.id, file.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    entries: RwLock<Vec<AudioHistoryEntry>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryRepositoryTrait for InMemoryHistoryRepository {
    async fn create(&self, entry: &AudioHistoryEntry) -> Result<(), AppError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AudioHistoryEntry>, AppError> {
        let mut entries: Vec<AudioHistoryEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.analysis_date
                .cmp(&a.analysis_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    async fn delete_by_id(&self, entry_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| !(entry.id == entry_id && entry.user_id == user_id));

        if entries.len() == before {
            return Err(AppError::NotFound(HISTORY_NOT_FOUND_MESSAGE.to_string()));
        }
        Ok(())
    }

    async fn clear_by_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| entry.user_id != user_id);
        Ok((before - entries.len()) as u64)
    }
}

/// Users are known once registered; `remove` mimics a soft delete.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashSet<Uuid>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub async fn register(&self, user_id: Uuid) {
        self.users.write().await.insert(user_id);
    }

    pub async fn remove(&self, user_id: Uuid) {
        self.users.write().await.remove(&user_id);
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.users.read().await.contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(user_id: Uuid, minutes_ago: i64) -> AudioHistoryEntry {
        AudioHistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            filename: format!("clip-{minutes_ago}.wav"),
            file_size: Some("1.00 KB".to_string()),
            probability: 42,
            s3_key: None,
            original_file_id: None,
            analysis_details: None,
            analysis_date: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_list_by_user_is_most_recent_first_and_scoped() {
        let repo = InMemoryHistoryRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let old = entry(alice, 30);
        let new = entry(alice, 1);
        repo.create(&old).await.unwrap();
        repo.create(&new).await.unwrap();
        repo.create(&entry(bob, 5)).await.unwrap();

        let first = repo.list_by_user(alice).await.unwrap();
        let second = repo.list_by_user(alice).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![new.id, old.id]
        );
    }

    #[tokio::test]
    async fn test_delete_of_other_users_entry_is_not_found() {
        let repo = InMemoryHistoryRepository::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let owned = entry(owner, 0);
        repo.create(&owned).await.unwrap();

        let foreign = repo.delete_by_id(owned.id, intruder).await.unwrap_err();
        let missing = repo.delete_by_id(Uuid::new_v4(), owner).await.unwrap_err();
        assert_eq!(foreign.to_string(), missing.to_string());
        assert!(matches!(foreign, AppError::NotFound(_)));

        repo.delete_by_id(owned.id, owner).await.unwrap();
        assert!(repo.list_by_user(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_by_user_leaves_other_users() {
        let repo = InMemoryHistoryRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.create(&entry(alice, 1)).await.unwrap();
        repo.create(&entry(alice, 2)).await.unwrap();
        repo.create(&entry(bob, 3)).await.unwrap();

        assert_eq!(repo.clear_by_user(alice).await.unwrap(), 2);
        assert!(repo.list_by_user(alice).await.unwrap().is_empty());
        assert_eq!(repo.list_by_user(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let known = Uuid::new_v4();
        let repo = InMemoryUserRepository::with_users([known]);
        assert!(repo.user_exists(known).await.unwrap());
        assert!(!repo.user_exists(Uuid::new_v4()).await.unwrap());
        repo.remove(known).await;
        assert!(!repo.user_exists(known).await.unwrap());
    }

    #[tokio::test]
    async fn test_audio_file_save_is_write_once() {
        let repo = InMemoryAudioFileRepository::new();
        let file = AudioFile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bucket: "audio".to_string(),
            s3_key: "k".to_string(),
            original_filename: "a.wav".to_string(),
            content_type: "audio/wav".to_string(),
            size_bytes: 4,
            uploaded_at: Utc::now(),
        };
        repo.save(&file).await.unwrap();
        assert!(repo.save(&file).await.is_err());
        assert_eq!(repo.get(file.id).await, Some(file));
    }
}
