//! Router assembly.
//!
//! Authenticated audio and history routes come from [`domains`], unauthenticated
//! probes from [`health`]. Body size, concurrency, CORS and tracing layers wrap all of them.

mod domains;
mod health;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use voiceguard_core::constants::MULTIPART_OVERHEAD_BYTES;
use voiceguard_core::Config;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config.cors_origins())?;
    Ok(build_router(state, cors))
}

/// Assemble the router for `state`. The request body limit follows the
/// configured upload maximum plus room for multipart framing.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router<()> {
    let auth_state = Arc::new(AuthState::new(&state.auth.jwt_secret));
    let body_limit = state.audio.limits.max_size_bytes + MULTIPART_OVERHEAD_BYTES;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let protected_routes = domains::audio_routes(state.clone())
        .merge(domains::history_routes(state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    public_routes(state.clone())
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` anywhere in the list allows every origin.
pub fn setup_cors(cors_origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let allow_origin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows all origins");
        AllowOrigin::any()
    } else {
        let origins = cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any))
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/health", get(health::health_check))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
}
