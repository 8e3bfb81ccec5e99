//! Wire messages of the `audio_analysis.AudioAnalysis` gRPC service.

use voiceguard_core::models::{AnalysisOutcome, ChunkPrediction};

pub const SERVICE_NAME: &str = "audio_analysis.AudioAnalysis";
pub const ANALYZE_AUDIO_PATH: &str = "/audio_analysis.AudioAnalysis/AnalyzeAudio";

#[derive(Clone, PartialEq, prost::Message)]
pub struct AnalyzeAudioRequest {
    #[prost(string, tag = "1")]
    pub minio_bucket_name: String,
    #[prost(string, tag = "2")]
    pub minio_object_key: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AudioChunkPrediction {
    #[prost(string, tag = "1")]
    pub chunk_id: String,
    #[prost(float, tag = "2")]
    pub score: f32,
    #[prost(float, tag = "3")]
    pub start_time_seconds: f32,
    #[prost(float, tag = "4")]
    pub end_time_seconds: f32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AnalyzeAudioResponse {
    #[prost(message, repeated, tag = "1")]
    pub predictions: Vec<AudioChunkPrediction>,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

impl From<AudioChunkPrediction> for ChunkPrediction {
    fn from(p: AudioChunkPrediction) -> Self {
        ChunkPrediction {
            chunk_id: p.chunk_id,
            score: p.score,
            start_time_seconds: p.start_time_seconds,
            end_time_seconds: p.end_time_seconds,
        }
    }
}

impl From<AnalyzeAudioResponse> for AnalysisOutcome {
    fn from(response: AnalyzeAudioResponse) -> Self {
        // Any non-empty message counts and is kept as sent.
        let service_error = Some(response.error_message).filter(|msg| !msg.is_empty());

        AnalysisOutcome {
            predictions: response.predictions.into_iter().map(Into::into).collect(),
            service_error,
        }
    }
}
