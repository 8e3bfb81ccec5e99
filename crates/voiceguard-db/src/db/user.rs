use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use voiceguard_core::AppError;

/// User lookup used to reject tokens whose user has since been removed.
#[async_trait::async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// True when the user exists and is not soft-deleted.
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for PostgresUserRepository {
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %user_id))]
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
