//! Repository wiring: PostgreSQL, or in-memory when `DATABASE_URL=memory`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use voiceguard_core::Config;
use voiceguard_db::{
    InMemoryAudioFileRepository, InMemoryHistoryRepository, InMemoryUserRepository,
    PostgresAudioFileRepository, PostgresHistoryRepository, PostgresUserRepository,
};

use crate::state::DbState;

/// `DATABASE_URL` value that selects the in-memory repositories.
pub const IN_MEMORY_DATABASE_URL: &str = "memory";

pub async fn setup_database(config: &Config) -> Result<DbState> {
    if config.database_url() == IN_MEMORY_DATABASE_URL {
        tracing::warn!("Using in-memory repositories; nothing survives a restart and no user can upload");
        return Ok(in_memory_db_state());
    }

    let pool = connect(config).await?;
    run_migrations(&pool).await?;

    Ok(DbState {
        audio_file_repository: Arc::new(PostgresAudioFileRepository::new(pool.clone())),
        history_repository: Arc::new(PostgresHistoryRepository::new(pool.clone())),
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        pool: Some(pool),
    })
}

async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database pool ready"
    );
    Ok(pool)
}

/// Applies `migrations/` at the workspace root.
async fn run_migrations(pool: &PgPool) -> Result<()> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = Migrator::new(dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(count = migrator.iter().count(), "Database migrations applied");
    Ok(())
}

pub fn in_memory_db_state() -> DbState {
    DbState {
        pool: None,
        audio_file_repository: Arc::new(InMemoryAudioFileRepository::new()),
        history_repository: Arc::new(InMemoryHistoryRepository::new()),
        user_repository: Arc::new(InMemoryUserRepository::new()),
    }
}
