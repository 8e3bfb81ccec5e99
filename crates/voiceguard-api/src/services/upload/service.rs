//! Audio upload service
//!
//! Runs one upload through blob write, metadata persist, remote analysis and
//! history persist. Validation happens before anything is written. Once the
//! blob write starts the remaining stages run on a spawned task, so a client
//! disconnect does not cut the pipeline short.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;
use voiceguard_core::constants::ANALYSIS_DEADLINE;
use voiceguard_core::models::{
    format_file_size, AnalysisOutcome, AudioFile, AudioHistoryEntry, ChunkPrediction,
    UploadAndAnalyzeAudioResponse,
};
use voiceguard_core::{aggregate_probability, AppError};
use voiceguard_db::{AudioFileRepositoryTrait, HistoryRepositoryTrait, UserRepositoryTrait};
use voiceguard_services::{AnalysisError, AudioAnalyzer};
use voiceguard_storage::{generate_audio_key, Storage};

use super::types::{UploadLimits, UploadRequest};
use crate::utils::upload::{clean_filename, validate_file_extension, validate_file_size};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found or deleted. Please re-login.";

pub const MESSAGE_ANALYSIS_FAILED: &str =
    "Audio file uploaded, but an error occurred while calling the analysis service.";
pub const MESSAGE_SERVICE_ERROR: &str =
    "Audio file uploaded, but the analysis service reported an error.";
pub const MESSAGE_ANALYZED: &str = "Audio file uploaded and analyzed successfully.";
pub const MESSAGE_NO_RESULTS: &str = "Audio file uploaded, but the analysis returned no results.";

/// How the analysis stage ended, as far as the response is concerned.
#[derive(Debug)]
enum AnalysisReport {
    /// The call itself failed or ran past the deadline.
    CallFailed(String),
    /// The service answered, possibly with its own error message.
    Answered(AnalysisOutcome),
}

impl AnalysisReport {
    fn from_result(result: Result<AnalysisOutcome, AnalysisError>) -> Self {
        match result {
            Ok(outcome) => AnalysisReport::Answered(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Failed to call audio analysis service");
                AnalysisReport::CallFailed(format!("gRPC call error: {}", e))
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AnalysisReport::CallFailed(_) => MESSAGE_ANALYSIS_FAILED,
            AnalysisReport::Answered(outcome) if outcome.service_error.is_some() => {
                MESSAGE_SERVICE_ERROR
            }
            AnalysisReport::Answered(outcome) if outcome.predictions.is_empty() => {
                MESSAGE_NO_RESULTS
            }
            AnalysisReport::Answered(_) => MESSAGE_ANALYZED,
        }
    }

    fn into_parts(self) -> (Option<String>, Vec<ChunkPrediction>) {
        match self {
            AnalysisReport::CallFailed(error) => (Some(error), Vec::new()),
            AnalysisReport::Answered(outcome) => (outcome.service_error, outcome.predictions),
        }
    }
}

/// Validated upload handed to the spawned pipeline.
struct StoredUpload {
    user_id: Uuid,
    filename: String,
    content_type: String,
    data: Bytes,
}

#[derive(Clone)]
pub struct AudioUploadService {
    storage: Arc<dyn Storage>,
    analyzer: Arc<dyn AudioAnalyzer>,
    audio_files: Arc<dyn AudioFileRepositoryTrait>,
    history: Arc<dyn HistoryRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    limits: UploadLimits,
    analysis_deadline: Duration,
}

impl AudioUploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        analyzer: Arc<dyn AudioAnalyzer>,
        audio_files: Arc<dyn AudioFileRepositoryTrait>,
        history: Arc<dyn HistoryRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            storage,
            analyzer,
            audio_files,
            history,
            users,
            limits,
            analysis_deadline: ANALYSIS_DEADLINE,
        }
    }

    pub fn with_analysis_deadline(mut self, deadline: Duration) -> Self {
        self.analysis_deadline = deadline;
        self
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Validate, store, analyze and record one upload.
    ///
    /// Errors are only returned for failures up to and including the
    /// metadata write. Analysis and history failures are reported through
    /// the response or the log.
    #[tracing::instrument(
        skip(self, request),
        fields(
            user_id = %request.user_id,
            size_bytes = request.data.len(),
            operation = "upload_audio"
        )
    )]
    pub async fn upload(
        &self,
        request: UploadRequest,
    ) -> Result<UploadAndAnalyzeAudioResponse, AppError> {
        validate_file_size(request.data.len(), self.limits.max_size_bytes)?;

        let filename = clean_filename(&request.filename);
        validate_file_extension(&filename, &self.limits.allowed_extensions).inspect_err(|_| {
            tracing::warn!(filename = %request.filename, "Rejected upload with unsupported extension");
        })?;

        // A lookup that errors is treated like an unknown user.
        let user_known = self
            .users
            .user_exists(request.user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "User lookup failed during audio upload");
                false
            });
        if !user_known {
            tracing::warn!("User not found for audio upload");
            return Err(AppError::Unauthorized(USER_NOT_FOUND_MESSAGE.to_string()));
        }

        let upload = StoredUpload {
            user_id: request.user_id,
            filename,
            content_type: request.content_type,
            data: request.data,
        };

        // Dropping the JoinHandle detaches the task; it never aborts it.
        let service = self.clone();
        tokio::spawn(async move { service.store_and_analyze(upload).await })
            .await
            .map_err(|e| AppError::Internal(format!("Upload pipeline task failed: {}", e)))?
    }

    async fn store_and_analyze(
        &self,
        upload: StoredUpload,
    ) -> Result<UploadAndAnalyzeAudioResponse, AppError> {
        let size_bytes = upload.data.len();
        let s3_key = generate_audio_key(upload.user_id, &upload.filename);

        tracing::info!(s3_key = %s3_key, content_type = %upload.content_type, "Uploading audio to storage");

        let file_url = self
            .storage
            .put(&s3_key, upload.data, &upload.content_type)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, s3_key = %s3_key, "Failed to upload audio to storage");
                AppError::from(e)
            })?;

        let audio_file = AudioFile {
            id: Uuid::new_v4(),
            user_id: upload.user_id,
            bucket: self.storage.bucket().to_string(),
            s3_key: s3_key.clone(),
            original_filename: upload.filename.clone(),
            content_type: upload.content_type,
            size_bytes: size_bytes as i64,
            uploaded_at: Utc::now(),
        };

        // The blob stays in place if this fails.
        self.audio_files.save(&audio_file).await.map_err(|e| {
            tracing::error!(error = %e, s3_key = %s3_key, "Failed to save audio metadata");
            AppError::MetadataPersist(e.to_string())
        })?;

        tracing::info!(
            file_id = %audio_file.id,
            s3_key = %s3_key,
            bucket = %audio_file.bucket,
            "Audio stored, starting analysis"
        );

        let report = AnalysisReport::from_result(self.run_analysis(&audio_file).await);
        let message = report.message();
        let (analysis_error, predictions) = report.into_parts();

        let probability = aggregate_probability(predictions.iter().map(|p| p.score));

        tracing::info!(
            file_id = %audio_file.id,
            prediction_count = predictions.len(),
            probability,
            "Audio analysis complete"
        );

        self.record_history(&audio_file, size_bytes, probability, &predictions)
            .await;

        Ok(UploadAndAnalyzeAudioResponse {
            file_id: audio_file.id,
            s3_key,
            message: message.to_string(),
            file_url: Some(file_url),
            analysis_error,
            analysis_results: predictions,
        })
    }

    /// The analyzer is handed the deadline and is also cut off locally once it passes.
    async fn run_analysis(&self, audio_file: &AudioFile) -> Result<AnalysisOutcome, AnalysisError> {
        let deadline = self.analysis_deadline;
        let locator = audio_file.locator();
        match tokio::time::timeout(deadline, self.analyzer.analyze(&locator, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(AnalysisError::DeadlineExceeded(deadline)),
        }
    }

    /// Failures here are logged and swallowed.
    async fn record_history(
        &self,
        audio_file: &AudioFile,
        size_bytes: usize,
        probability: i32,
        predictions: &[ChunkPrediction],
    ) {
        let analysis_details = if predictions.is_empty() {
            None
        } else {
            match serde_json::to_value(predictions) {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::error!(error = %e, s3_key = %audio_file.s3_key, "Failed to serialize analysis results for history");
                    None
                }
            }
        };

        let entry = AudioHistoryEntry {
            id: Uuid::new_v4(),
            user_id: audio_file.user_id,
            filename: audio_file.original_filename.clone(),
            file_size: Some(format_file_size(size_bytes as u64)),
            probability,
            s3_key: Some(audio_file.s3_key.clone()),
            original_file_id: Some(audio_file.id),
            analysis_details,
            analysis_date: Utc::now(),
        };

        if let Err(e) = self.history.create(&entry).await {
            tracing::error!(
                error = %e,
                user_id = %audio_file.user_id,
                s3_key = %audio_file.s3_key,
                "Failed to save audio analysis to history"
            );
        }
    }
}
