//! Configuration module
//!
//! Environment-driven settings for the API server: HTTP, database, storage,
//! authentication and the remote analysis service.

use std::env;

use crate::constants::{DEFAULT_ANALYZER_ADDR, DEFAULT_AUDIO_EXTENSIONS, DEFAULT_MAX_AUDIO_SIZE_MB};
use crate::storage_types::StorageBackend;

const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SERVER_PORT: u16 = 3000;

/// Settings shared by every process in the deployment
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Output format of the fmt tracing layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Audio upload and analysis service configuration
#[derive(Clone, Debug)]
pub struct AudioServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // MinIO or another S3-compatible provider
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload limits
    pub max_audio_size_bytes: usize,
    pub audio_allowed_extensions: Vec<String>,
    // Remote analysis service
    pub analyzer_grpc_addr: String,
}

/// Application configuration handle passed to setup code.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AudioServiceConfig>);

impl Config {
    pub fn new(inner: AudioServiceConfig) -> Self {
        Config(Box::new(inner))
    }

    fn inner(&self) -> &AudioServiceConfig {
        &self.0
    }

    pub fn is_production(&self) -> bool {
        is_production_name(self.environment())
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AudioServiceConfig::from_env()?;
        Ok(Config::new(config))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate(self.is_production())
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn max_audio_size_bytes(&self) -> usize {
        self.inner().max_audio_size_bytes
    }

    pub fn audio_allowed_extensions(&self) -> &[String] {
        &self.inner().audio_allowed_extensions
    }

    pub fn analyzer_grpc_addr(&self) -> &str {
        &self.inner().analyzer_grpc_addr
    }
}

/// `production` and `prod`, in any case, name the production environment.
pub fn is_production_name(environment: &str) -> bool {
    matches!(
        environment.trim().to_lowercase().as_str(),
        "production" | "prod"
    )
}

/// Deployment environment from `ENVIRONMENT`, falling back to `APP_ENV`.
pub fn environment_from_env() -> Option<String> {
    env::var("ENVIRONMENT").or_else(|_| env::var("APP_ENV")).ok()
}

/// Split a comma separated list, trimming and lowercasing entries and
/// dropping a leading dot so both `wav` and `.wav` are accepted.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl AudioServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = environment_from_env().unwrap_or_else(|| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
            log_format: LogFormat::parse(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
            ),
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| s.parse::<StorageBackend>().ok());

        let max_audio_size_mb = env::var("MAX_AUDIO_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_AUDIO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_AUDIO_SIZE_MB);

        let audio_allowed_extensions = parse_extension_list(
            &env::var("AUDIO_ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| DEFAULT_AUDIO_EXTENSIONS.join(",")),
        );

        Ok(AudioServiceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_audio_size_bytes: max_audio_size_mb * 1024 * 1024,
            audio_allowed_extensions,
            analyzer_grpc_addr: env::var("ANALYZER_GRPC_ADDR")
                .unwrap_or_else(|_| DEFAULT_ANALYZER_ADDR.to_string()),
        })
    }

    pub fn validate(&self, is_production: bool) -> Result<(), anyhow::Error> {
        if self.database_url.trim().is_empty() {
            return Err(anyhow::anyhow!("DATABASE_URL must not be empty"));
        }

        if is_production && self.base.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.max_audio_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_AUDIO_SIZE_MB must be greater than 0"));
        }

        if self.audio_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "AUDIO_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        match self.storage_backend.unwrap_or(StorageBackend::S3) {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
