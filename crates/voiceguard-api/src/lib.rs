//! VoiceGuard API
//!
//! HTTP surface for the audio upload pipeline: authenticated upload with
//! remote analysis, plus per-user history.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{AudioUploadService, UploadLimits, UploadRequest};
pub use state::AppState;
