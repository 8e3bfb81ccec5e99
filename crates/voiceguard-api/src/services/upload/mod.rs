//! Upload-analyze-record pipeline for audio files

mod service;
mod types;

pub use service::{
    AudioUploadService, MESSAGE_ANALYSIS_FAILED, MESSAGE_ANALYZED, MESSAGE_NO_RESULTS,
    MESSAGE_SERVICE_ERROR, USER_NOT_FOUND_MESSAGE,
};
pub use types::{UploadLimits, UploadRequest};
