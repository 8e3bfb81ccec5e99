//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use voiceguard_core::models;

/// Registers the bearer JWT scheme referenced by the handler annotations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VoiceGuard API",
        version = "0.1.0",
        description = "Audio upload and analysis API. Uploaded files are stored, scored by the remote analysis service and recorded in the caller's history. All endpoints are versioned under /api/v1/."
    ),
    paths(
        // Audio
        handlers::audio_upload::upload_audio,
        // History
        handlers::history::list_history,
        handlers::history::delete_history_entry,
        handlers::history::clear_history,
    ),
    components(
        schemas(
            models::UploadAndAnalyzeAudioResponse,
            models::ChunkPrediction,
            models::AudioHistoryEntry,
            models::MessageResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "audio", description = "Audio upload and analysis"),
        (name = "history", description = "Per-user analysis history")
    )
)]
pub struct ApiDoc;
