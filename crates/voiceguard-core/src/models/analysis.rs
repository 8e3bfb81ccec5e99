use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One scored sub-interval of an analyzed audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChunkPrediction {
    pub chunk_id: String,
    /// Score in `[0, 1]`
    pub score: f32,
    pub start_time_seconds: f32,
    pub end_time_seconds: f32,
}

/// What the analysis service returned for one blob.
///
/// `service_error` is set when the service answered but reported its own
/// failure; predictions may still be partially filled in that case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOutcome {
    pub predictions: Vec<ChunkPrediction>,
    pub service_error: Option<String>,
}
