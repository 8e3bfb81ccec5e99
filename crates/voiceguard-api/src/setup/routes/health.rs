//! Probe endpoints: `/ping`, `/live`, `/ready` and `/health`.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe key that is never written; only reachability matters.
const STORAGE_PROBE_KEY: &str = "health-check-non-existent-key";

/// Result of probing one dependency, rendered as `healthy`, `in_memory`,
/// `timeout` or `unhealthy: {error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Probe {
    Healthy,
    InMemory,
    TimedOut,
    Failed(String),
}

impl Probe {
    async fn run<F, E>(check: F) -> Self
    where
        F: Future<Output = Result<(), E>>,
        E: Display,
    {
        match tokio::time::timeout(PROBE_TIMEOUT, check).await {
            Ok(Ok(())) => Probe::Healthy,
            Ok(Err(e)) => Probe::Failed(e.to_string()),
            Err(_) => Probe::TimedOut,
        }
    }

    fn is_up(&self) -> bool {
        matches!(self, Probe::Healthy | Probe::InMemory)
    }

    fn render(&self) -> String {
        match self {
            Probe::Healthy => "healthy".to_string(),
            Probe::InMemory => "in_memory".to_string(),
            Probe::TimedOut => "timeout".to_string(),
            Probe::Failed(e) => format!("unhealthy: {}", e),
        }
    }
}

async fn probe_database(state: &AppState) -> Probe {
    match state.db.pool.clone() {
        Some(pool) => {
            Probe::run(async move { sqlx::query("SELECT 1").execute(&pool).await.map(drop) })
                .await
        }
        None => Probe::InMemory,
    }
}

async fn probe_storage(state: &AppState) -> Probe {
    let storage = state.audio.storage.clone();
    Probe::run(async move { storage.exists(STORAGE_PROBE_KEY).await.map(drop) }).await
}

#[derive(Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub database: String,
    pub storage: String,
}

pub async fn ping() -> &'static str {
    "pong"
}

/// Liveness: the process is serving requests.
pub async fn liveness_check() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

/// Readiness: the metadata and history stores are reachable.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let database = probe_database(&state).await;
    let ready = database.is_up();
    if !ready {
        tracing::error!(database = %database.render(), "Database readiness check failed");
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "database": database.render(),
        })),
    )
}

/// Full health: database plus blob storage. Storage trouble degrades the
/// report without failing it, since uploads are then refused individually.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthCheckResponse>) {
    let (database, storage) = tokio::join!(probe_database(&state), probe_storage(&state));

    let status = match (database.is_up(), storage.is_up()) {
        (false, _) => "unhealthy",
        (true, false) => "degraded",
        (true, true) => "healthy",
    };
    let code = if database.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthCheckResponse {
            status,
            database: database.render(),
            storage: storage.render(),
        }),
    )
}
