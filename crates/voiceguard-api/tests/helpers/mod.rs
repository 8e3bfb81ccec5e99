//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in process: in-memory repositories, local storage in a
//! temp dir and a scripted analyzer. No database or analysis service needed.

#![allow(dead_code)]

pub mod analyzer;
pub mod auth;
pub mod failing;

use analyzer::{sample_predictions, ScriptedAnalyzer};
use auth::{bearer, valid_token, TestUser, TEST_JWT_SECRET};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;
use voiceguard_api::constants::API_PREFIX;
use voiceguard_api::setup::routes::{build_router, setup_cors};
use voiceguard_api::state::{AppState, DbState};
use voiceguard_api::UploadLimits;
use voiceguard_db::{
    AudioFileRepositoryTrait, HistoryRepositoryTrait, InMemoryAudioFileRepository,
    InMemoryHistoryRepository, InMemoryUserRepository,
};
use voiceguard_services::AudioAnalyzer;
use voiceguard_storage::{LocalStorage, Storage};

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Collaborators for one test app. `None` means the in-memory or local default.
pub struct TestAppOptions {
    pub analyzer: Arc<dyn AudioAnalyzer>,
    pub storage: Option<Arc<dyn Storage>>,
    pub audio_file_repository: Option<Arc<dyn AudioFileRepositoryTrait>>,
    pub history_repository: Option<Arc<dyn HistoryRepositoryTrait>>,
    pub max_size_bytes: usize,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            analyzer: Arc::new(ScriptedAnalyzer::answering(sample_predictions())),
            storage: None,
            audio_file_repository: None,
            history_repository: None,
            max_size_bytes: 64 * 1024,
        }
    }
}

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub users: Arc<InMemoryUserRepository>,
    pub audio_files: Arc<InMemoryAudioFileRepository>,
    pub history: Arc<InMemoryHistoryRepository>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Register a user with the user repository and mint a token for it.
    pub async fn register_user(&self) -> TestUser {
        let user_id = Uuid::new_v4();
        self.users.register(user_id).await;
        TestUser {
            user_id,
            token: valid_token(user_id),
        }
    }

    /// Number of blobs written to the local storage directory.
    pub fn stored_blob_count(&self) -> usize {
        count_files(self.temp_dir.path())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() {
                        count_files(&path)
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = match options.storage {
        Some(storage) => storage,
        None => Arc::new(
            LocalStorage::new(
                temp_dir.path().join("audio"),
                Some("http://localhost:3000/audio".to_string()),
            )
            .await
            .expect("Failed to create local storage"),
        ),
    };

    let users = Arc::new(InMemoryUserRepository::new());
    let audio_files = Arc::new(InMemoryAudioFileRepository::new());
    let history = Arc::new(InMemoryHistoryRepository::new());

    let db = DbState {
        pool: None,
        audio_file_repository: options
            .audio_file_repository
            .unwrap_or_else(|| audio_files.clone() as Arc<dyn AudioFileRepositoryTrait>),
        history_repository: options
            .history_repository
            .unwrap_or_else(|| history.clone() as Arc<dyn HistoryRepositoryTrait>),
        user_repository: users.clone(),
    };

    let limits = UploadLimits {
        max_size_bytes: options.max_size_bytes,
        allowed_extensions: ["wav", "mp3", "ogg", "webm"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let state = Arc::new(AppState::new(
        db,
        storage,
        options.analyzer,
        limits,
        TEST_JWT_SECRET,
    ));

    let cors = setup_cors(&["*".to_string()]).expect("Failed to build CORS layer");
    let app = build_router(state.clone(), cors);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        users,
        audio_files,
        history,
        temp_dir,
    }
}

/// POST one file as the `audiofile` field.
pub async fn upload_audio(
    client: &TestServer,
    token: &str,
    filename: &str,
    data: Vec<u8>,
    mime_type: &str,
) -> TestResponse {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(mime_type.to_string());
    let form = MultipartForm::new().add_part("audiofile", part);
    client
        .post(&api_path("/audio/upload"))
        .add_header("Authorization", bearer(token))
        .multipart(form)
        .await
}

/// A few bytes that pass for a WAV upload.
pub fn wav_bytes(len: usize) -> Vec<u8> {
    let mut data = b"RIFF\0\0\0\0WAVEfmt ".to_vec();
    data.resize(len.max(data.len()), 0);
    data
}
