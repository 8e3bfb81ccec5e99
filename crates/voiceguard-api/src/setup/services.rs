//! Service initialization

use crate::services::upload::UploadLimits;
use crate::state::{AppState, DbState};
use anyhow::{Context, Result};
use std::sync::Arc;
use voiceguard_core::Config;
use voiceguard_services::GrpcAudioAnalyzer;
use voiceguard_storage::Storage;

/// Create the analysis client and assemble the application state.
pub fn initialize_services(
    config: &Config,
    db: DbState,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let analyzer = GrpcAudioAnalyzer::new(config.analyzer_grpc_addr())
        .context("Failed to create analysis client")?;

    let limits = UploadLimits::from_config(config);
    tracing::info!(
        max_audio_mb = limits.max_size_bytes / 1024 / 1024,
        audio_extensions = %limits.allowed_extensions.join(","),
        analyzer_addr = %analyzer.addr(),
        "Upload pipeline configured"
    );

    Ok(Arc::new(AppState::new(
        db,
        storage,
        Arc::new(analyzer),
        limits,
        config.jwt_secret(),
    )))
}
