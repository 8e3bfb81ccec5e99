//! Types used by the audio upload service

use bytes::Bytes;
use uuid::Uuid;
use voiceguard_core::Config;

/// One upload as received from the client. Nothing here is validated yet.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub user_id: Uuid,
    pub data: Bytes,
    /// Filename as declared by the client (may contain path components)
    pub filename: String,
    pub content_type: String,
}

/// Size and format limits applied before anything is stored.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_size_bytes: usize,
    /// Lowercase extensions without the leading dot
    pub allowed_extensions: Vec<String>,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_size_bytes: config.max_audio_size_bytes(),
            allowed_extensions: config.audio_allowed_extensions().to_vec(),
        }
    }
}
