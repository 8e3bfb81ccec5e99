use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Descriptive metadata for one stored audio blob. Written once after the
/// blob write succeeds and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AudioFile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bucket: String,
    pub s3_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl AudioFile {
    pub fn locator(&self) -> BlobLocator {
        BlobLocator {
            bucket: self.bucket.clone(),
            key: self.s3_key.clone(),
        }
    }
}

/// Bucket and key of a stored blob, as handed to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobLocator {
    pub bucket: String,
    pub key: String,
}

impl std::fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
