use std::time::Duration;

use async_trait::async_trait;
use http::uri::PathAndQuery;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, GrpcMethod, Request, Response, Status};
use voiceguard_core::models::{AnalysisOutcome, BlobLocator};

use super::analyzer::{AnalysisError, AudioAnalyzer};
use super::proto::{AnalyzeAudioRequest, AnalyzeAudioResponse, ANALYZE_AUDIO_PATH, SERVICE_NAME};

/// Client for the remote `AudioAnalysis` gRPC service.
///
/// The channel is created lazily so the API can start while the analysis
/// service is still down.
#[derive(Clone)]
pub struct GrpcAudioAnalyzer {
    grpc: Grpc<Channel>,
    addr: String,
}

impl GrpcAudioAnalyzer {
    /// `addr` may omit the scheme, `localhost:50051` is treated as `http://localhost:50051`.
    pub fn new(addr: &str) -> anyhow::Result<Self> {
        let addr = if addr.contains("://") {
            addr.to_string()
        } else {
            format!("http://{}", addr)
        };

        let endpoint = Endpoint::from_shared(addr.clone())
            .map_err(|e| anyhow::anyhow!("Invalid analyzer address {}: {}", addr, e))?;
        let channel = endpoint.connect_lazy();

        tracing::info!(analyzer_addr = %addr, "Analysis channel created");

        Ok(Self {
            grpc: Grpc::new(channel),
            addr,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn call(
        &self,
        request: AnalyzeAudioRequest,
        deadline: Duration,
    ) -> Result<AnalyzeAudioResponse, Status> {
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("Service was not ready: {}", e)))?;

        let mut request = Request::new(request);
        request.set_timeout(deadline);
        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, "AnalyzeAudio"));

        let response: Response<AnalyzeAudioResponse> = grpc
            .unary(
                request,
                PathAndQuery::from_static(ANALYZE_AUDIO_PATH),
                ProstCodec::default(),
            )
            .await?;

        Ok(response.into_inner())
    }
}

fn classify_status(status: Status, deadline: Duration) -> AnalysisError {
    match status.code() {
        Code::DeadlineExceeded => AnalysisError::DeadlineExceeded(deadline),
        _ => AnalysisError::Transport(format!("{:?}: {}", status.code(), status.message())),
    }
}

#[async_trait]
impl AudioAnalyzer for GrpcAudioAnalyzer {
    #[tracing::instrument(skip(self), fields(analyzer.addr = %self.addr, bucket = %locator.bucket, key = %locator.key))]
    async fn analyze(
        &self,
        locator: &BlobLocator,
        deadline: Duration,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let request = AnalyzeAudioRequest {
            minio_bucket_name: locator.bucket.clone(),
            minio_object_key: locator.key.clone(),
        };

        let start = std::time::Instant::now();

        let response = match tokio::time::timeout(deadline, self.call(request, deadline)).await {
            Ok(Ok(response)) => response,
            Ok(Err(status)) => {
                tracing::error!(
                    code = ?status.code(),
                    error = %status.message(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "AnalyzeAudio call failed"
                );
                return Err(classify_status(status, deadline));
            }
            Err(_) => {
                tracing::error!(deadline_secs = deadline.as_secs(), "AnalyzeAudio call timed out");
                return Err(AnalysisError::DeadlineExceeded(deadline));
            }
        };

        let outcome = AnalysisOutcome::from(response);

        if let Some(ref service_error) = outcome.service_error {
            tracing::warn!(service_error = %service_error, "Analysis service returned an error message");
        }

        tracing::debug!(
            prediction_count = outcome.predictions.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Received AnalyzeAudio response"
        );

        Ok(outcome)
    }
}
