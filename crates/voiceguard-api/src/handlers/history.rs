use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::DbState;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use voiceguard_core::models::{AudioHistoryEntry, MessageResponse};
use voiceguard_core::AppError;

pub const HISTORY_CLEARED_MESSAGE: &str = "Audio history cleared successfully";
pub const HISTORY_ENTRY_DELETED_MESSAGE: &str = "History entry deleted successfully";
pub const INVALID_ENTRY_ID_MESSAGE: &str = "Invalid history entry ID format";

#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "history",
    responses(
        (status = 200, description = "History entries, most recent first", body = Vec<AudioHistoryEntry>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(db), fields(user_id = %user_ctx.user_id, operation = "list_history"))]
pub async fn list_history(
    State(db): State<DbState>,
    user_ctx: UserContext,
) -> Result<Json<Vec<AudioHistoryEntry>>, HttpAppError> {
    let entries = db.history_repository.list_by_user(user_ctx.user_id).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    delete,
    path = "/api/v1/history/{entry_id}",
    tag = "history",
    params(
        ("entry_id" = String, Path, description = "History entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 400, description = "Malformed entry ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No such entry for this user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(db),
    fields(user_id = %user_ctx.user_id, entry_id = %entry_id, operation = "delete_history_entry")
)]
pub async fn delete_history_entry(
    State(db): State<DbState>,
    user_ctx: UserContext,
    Path(entry_id): Path<String>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let entry_id = Uuid::parse_str(&entry_id)
        .map_err(|_| AppError::BadRequest(INVALID_ENTRY_ID_MESSAGE.to_string()))?;

    db.history_repository
        .delete_by_id(entry_id, user_ctx.user_id)
        .await?;

    Ok(Json(MessageResponse::new(HISTORY_ENTRY_DELETED_MESSAGE)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/history",
    tag = "history",
    responses(
        (status = 200, description = "All of the caller's entries removed", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(db), fields(user_id = %user_ctx.user_id, operation = "clear_history"))]
pub async fn clear_history(
    State(db): State<DbState>,
    user_ctx: UserContext,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let removed = db.history_repository.clear_by_user(user_ctx.user_id).await?;
    tracing::info!(removed, "Cleared audio history");
    Ok(Json(MessageResponse::new(HISTORY_CLEARED_MESSAGE)))
}
