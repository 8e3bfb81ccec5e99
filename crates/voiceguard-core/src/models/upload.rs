use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::analysis::ChunkPrediction;

/// Composite result of an upload. Returned with 201 whenever the blob and
/// its metadata were stored, whatever happened during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadAndAnalyzeAudioResponse {
    pub file_id: Uuid,
    pub s3_key: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis_results: Vec<ChunkPrediction>,
}

/// Plain `{"message": ...}` acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
