use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadRequest;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use voiceguard_core::models::UploadAndAnalyzeAudioResponse;

#[utoipa::path(
    post,
    path = "/api/v1/audio/upload",
    tag = "audio",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with one `audiofile` field"),
    responses(
        (status = 201, description = "Audio stored; analysis fields describe how analysis went", body = UploadAndAnalyzeAudioResponse),
        (status = 400, description = "File too large or unsupported format", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or unknown user", body = ErrorResponse),
        (status = 500, description = "Storage or metadata failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user_ctx.user_id, operation = "upload_audio")
)]
pub async fn upload_audio(
    State(state): State<Arc<AppState>>,
    user_ctx: UserContext,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadAndAnalyzeAudioResponse>), HttpAppError> {
    let service = &state.audio.upload_service;

    let file = extract_multipart_file(multipart, service.limits().max_size_bytes).await?;

    let response = service
        .upload(UploadRequest {
            user_id: user_ctx.user_id,
            data: file.data,
            filename: file.filename,
            content_type: file.content_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}
