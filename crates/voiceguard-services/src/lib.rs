//! VoiceGuard Services Layer
//!
//! Clients for services outside this process. Today that is the remote audio
//! analysis service, reached through the [`AudioAnalyzer`] trait.

pub mod services;

pub use services::analyzer::{AnalysisError, AudioAnalyzer};
#[cfg(feature = "analyzer-grpc")]
pub use services::grpc_analyzer::GrpcAudioAnalyzer;
