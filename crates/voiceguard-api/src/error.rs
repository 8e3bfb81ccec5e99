//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>` and use `?` on anything that
//! converts into [`AppError`]. The conversion to a response picks the status
//! from [`ErrorMetadata`] and decides whether internal details may be shown.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use voiceguard_core::config::{environment_from_env, is_production_name};
use voiceguard_core::{AppError, ErrorMetadata, LogLevel};
use voiceguard_storage::StorageError;

/// JSON body of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Error text and source chain; only outside production and only for
    /// non-sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Stable code such as `UNSUPPORTED_FORMAT`
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(error: &AppError, expose_details: bool) -> Self {
        let (details, error_type) = if expose_details && !error.is_sensitive() {
            (
                Some(error.detailed_message()),
                Some(error.error_type().to_string()),
            )
        } else {
            (None, None)
        };

        Self {
            error: error.client_message(),
            details,
            error_type,
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

/// `AppError` wrapper that axum can render.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(err.into())
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<PathRejection> for HttpAppError {
    fn from(rejection: PathRejection) -> Self {
        HttpAppError(AppError::BadRequest(rejection.body_text()))
    }
}

fn expose_details() -> bool {
    !environment_from_env().is_some_and(|env| is_production_name(&env))
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status =
            StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_type = error.error_type();
        match error.log_level() {
            LogLevel::Debug => tracing::debug!(error = %error, error_type, "Request failed"),
            LogLevel::Warn => tracing::warn!(error = %error, error_type, "Request failed"),
            LogLevel::Error => tracing::error!(error = %error, error_type, "Request failed"),
        }

        let body = ErrorResponse::from_app_error(&error, expose_details());
        (status, Json(body)).into_response()
    }
}
