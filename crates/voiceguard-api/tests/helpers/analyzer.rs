#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use voiceguard_core::models::{AnalysisOutcome, BlobLocator, ChunkPrediction};
use voiceguard_services::{AnalysisError, AudioAnalyzer};

/// What a [`ScriptedAnalyzer`] does on every call.
#[derive(Clone)]
pub enum Script {
    Answer(AnalysisOutcome),
    Transport(String),
    /// Never answers; the caller's deadline has to cut it off.
    Hang,
    /// Answers with the sample predictions once the gate is notified.
    Gate(Arc<tokio::sync::Notify>),
}

/// Analyzer with a fixed answer that records the locators it was asked about.
pub struct ScriptedAnalyzer {
    script: Script,
    calls: Mutex<Vec<(BlobLocator, Duration)>>,
}

impl ScriptedAnalyzer {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(predictions: Vec<ChunkPrediction>) -> Self {
        Self::new(Script::Answer(AnalysisOutcome {
            predictions,
            service_error: None,
        }))
    }

    pub fn calls(&self) -> Vec<(BlobLocator, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioAnalyzer for ScriptedAnalyzer {
    async fn analyze(
        &self,
        locator: &BlobLocator,
        deadline: Duration,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        self.calls.lock().unwrap().push((locator.clone(), deadline));
        match &self.script {
            Script::Answer(outcome) => Ok(outcome.clone()),
            Script::Transport(message) => Err(AnalysisError::Transport(message.clone())),
            Script::Hang => std::future::pending().await,
            Script::Gate(gate) => {
                gate.notified().await;
                Ok(AnalysisOutcome {
                    predictions: sample_predictions(),
                    service_error: None,
                })
            }
        }
    }
}

pub fn prediction(chunk_id: &str, score: f32, start: f32) -> ChunkPrediction {
    ChunkPrediction {
        chunk_id: chunk_id.to_string(),
        score,
        start_time_seconds: start,
        end_time_seconds: start + 2.0,
    }
}

/// Three chunks whose aggregate is 75.
pub fn sample_predictions() -> Vec<ChunkPrediction> {
    vec![
        prediction("chunk_0", 0.81, 0.0),
        prediction("chunk_1", 0.93, 2.0),
        prediction("chunk_2", 0.50, 4.0),
    ]
}
