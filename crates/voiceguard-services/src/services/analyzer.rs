use std::time::Duration;

use async_trait::async_trait;
use voiceguard_core::models::{AnalysisOutcome, BlobLocator};

/// The call did not produce an answer from the analysis service.
///
/// A service that answers with its own error message is not an
/// `AnalysisError`; that arrives as [`AnalysisOutcome::service_error`].
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Transport(String),

    #[error("analysis did not complete within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Remote analysis of a stored blob.
#[async_trait]
pub trait AudioAnalyzer: Send + Sync {
    /// Analyze the blob at `locator`, giving up once `deadline` has elapsed.
    async fn analyze(
        &self,
        locator: &BlobLocator,
        deadline: Duration,
    ) -> Result<AnalysisOutcome, AnalysisError>;
}
