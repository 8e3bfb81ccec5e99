//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use voiceguard_core::Config;

/// Validate critical configuration values
///
/// Field-level checks live in [`Config::validate`]; this adds the checks that
/// only matter for a running server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    // Validate database connection settings
    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.analyzer_grpc_addr().trim().is_empty() {
        return Err(anyhow::anyhow!("ANALYZER_GRPC_ADDR must not be empty"));
    }

    Ok(())
}
