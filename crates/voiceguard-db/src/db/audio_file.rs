use sqlx::PgPool;
use voiceguard_core::models::AudioFile;
use voiceguard_core::AppError;

/// File Metadata Store: one immutable row per stored blob.
#[async_trait::async_trait]
pub trait AudioFileRepositoryTrait: Send + Sync {
    async fn save(&self, file: &AudioFile) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PostgresAudioFileRepository {
    pool: PgPool,
}

impl PostgresAudioFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AudioFileRepositoryTrait for PostgresAudioFileRepository {
    #[tracing::instrument(skip(self, file), fields(
        db.system = "postgresql",
        db.table = "audio_files",
        db.operation = "insert",
        db.record_id = %file.id
    ))]
    async fn save(&self, file: &AudioFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audio_files (
                id, user_id, bucket, s3_key, original_filename, content_type, size_bytes, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(file.id)
        .bind(file.user_id)
        .bind(&file.bucket)
        .bind(&file.s3_key)
        .bind(&file.original_filename)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .bind(file.uploaded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
