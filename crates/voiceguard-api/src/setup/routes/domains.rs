//! Domain route groups (audio upload, history).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;

pub fn audio_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/audio/upload", API_PREFIX),
            post(handlers::audio_upload::upload_audio),
        )
        .with_state(state)
}

pub fn history_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/history", API_PREFIX),
            get(handlers::history::list_history).delete(handlers::history::clear_history),
        )
        .route(
            &format!("{}/history/{{entry_id}}", API_PREFIX),
            delete(handlers::history::delete_history_entry),
        )
        .with_state(state)
}
