use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use voiceguard_core::models::AudioHistoryEntry;
use voiceguard_core::AppError;

/// Returned for both a missing entry and another user's entry.
pub const HISTORY_NOT_FOUND_MESSAGE: &str =
    "History entry not found or you are not authorized to delete it";

/// History Store: analysis outcomes scoped to their owning user.
#[async_trait::async_trait]
pub trait HistoryRepositoryTrait: Send + Sync {
    async fn create(&self, entry: &AudioHistoryEntry) -> Result<(), AppError>;

    /// Entries owned by `user_id`, most recent first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AudioHistoryEntry>, AppError>;

    /// Delete one entry. Fails with `NotFound` unless the entry exists and
    /// belongs to `user_id`.
    async fn delete_by_id(&self, entry_id: Uuid, user_id: Uuid) -> Result<(), AppError>;

    async fn clear_by_user(&self, user_id: Uuid) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct PostgresHistoryRepository {
    pool: PgPool,
}

impl PostgresHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HistoryRepositoryTrait for PostgresHistoryRepository {
    #[tracing::instrument(skip(self, entry), fields(
        db.system = "postgresql",
        db.table = "audio_history",
        db.operation = "insert",
        db.record_id = %entry.id
    ))]
    async fn create(&self, entry: &AudioHistoryEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audio_history (
                id, user_id, filename, file_size, probability,
                s3_key, original_file_id, analysis_details, analysis_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.filename)
        .bind(&entry.file_size)
        .bind(entry.probability)
        .bind(&entry.s3_key)
        .bind(entry.original_file_id)
        .bind(&entry.analysis_details)
        .bind(entry.analysis_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "audio_history", db.operation = "select"))]
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AudioHistoryEntry>, AppError> {
        let entries = sqlx::query_as::<Postgres, AudioHistoryEntry>(
            r#"
            SELECT id, user_id, filename, file_size, probability,
                   s3_key, original_file_id, analysis_details, analysis_date
            FROM audio_history
            WHERE user_id = $1
            ORDER BY analysis_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    #[tracing::instrument(skip(self), fields(db.table = "audio_history", db.operation = "delete", db.record_id = %entry_id))]
    async fn delete_by_id(&self, entry_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let rows_affected = sqlx::query("DELETE FROM audio_history WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(HISTORY_NOT_FOUND_MESSAGE.to_string()));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "audio_history", db.operation = "delete"))]
    async fn clear_by_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let rows_affected = sqlx::query("DELETE FROM audio_history WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(rows_affected, "Cleared audio history");
        Ok(rows_affected)
    }
}
