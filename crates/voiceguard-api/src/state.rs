//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers extract only what they need
//! via Axum's `FromRef`.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use voiceguard_db::{AudioFileRepositoryTrait, HistoryRepositoryTrait, UserRepositoryTrait};
use voiceguard_services::AudioAnalyzer;
use voiceguard_storage::Storage;

use crate::services::upload::{AudioUploadService, UploadLimits};

// ----- Sub-state types -----

/// Database pool and repositories.
///
/// `pool` is `None` when the repositories are in memory.
#[derive(Clone)]
pub struct DbState {
    pub pool: Option<PgPool>,
    pub audio_file_repository: Arc<dyn AudioFileRepositoryTrait>,
    pub history_repository: Arc<dyn HistoryRepositoryTrait>,
    pub user_repository: Arc<dyn UserRepositoryTrait>,
}

/// Blob storage, the analysis client and the upload pipeline built on them.
#[derive(Clone)]
pub struct AudioState {
    pub storage: Arc<dyn Storage>,
    pub analyzer: Arc<dyn AudioAnalyzer>,
    pub limits: UploadLimits,
    pub upload_service: AudioUploadService,
}

/// Secret used to verify bearer tokens.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

// ----- AppState -----

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub audio: AudioState,
    pub auth: AuthConfig,
}

impl AppState {
    /// Wire the upload pipeline from its collaborators.
    pub fn new(
        db: DbState,
        storage: Arc<dyn Storage>,
        analyzer: Arc<dyn AudioAnalyzer>,
        limits: UploadLimits,
        jwt_secret: impl Into<String>,
    ) -> Self {
        let upload_service = AudioUploadService::new(
            storage.clone(),
            analyzer.clone(),
            db.audio_file_repository.clone(),
            db.history_repository.clone(),
            db.user_repository.clone(),
            limits.clone(),
        );

        Self {
            db,
            audio: AudioState {
                storage,
                analyzer,
                limits,
                upload_service,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret.into(),
            },
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl FromRef<Arc<AppState>> for AudioState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.audio.clone()
    }
}

impl FromRef<Arc<AppState>> for AuthConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}
