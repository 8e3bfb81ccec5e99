//! VoiceGuard Core Library
//!
//! Domain models, error types, configuration and scoring shared by the
//! storage, database, analysis and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod scoring;
pub mod storage_types;

pub use config::{AudioServiceConfig, BaseConfig, Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use scoring::aggregate_probability;
pub use storage_types::StorageBackend;
