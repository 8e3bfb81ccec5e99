//! Error types module
//!
//! Every failure the API can surface is an [`AppError`]. How a variant is
//! presented over HTTP (status, code, whether details leak, how loudly it is
//! logged) is fixed per variant in [`AppError::class`], so handlers only
//! propagate errors with `?`.
//!
//! With the `sqlx` feature off, `Database` carries a rendered message instead of
//! the driver error.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// How loudly an error is logged when it is turned into a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Client mistakes: bad input, missing auth, unknown ids
    Debug,
    Warn,
    /// Our own failures: storage, database, internal
    Error,
}

/// Presentation of an error to API clients.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable upper snake case code, e.g. `"STORAGE_ERROR"`
    fn error_code(&self) -> &'static str;

    /// True when sending the same request again may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message placed in the `error` field of the response body.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their internal message or source chain.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    /// Blob write failed; nothing was persisted.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The blob is stored but its metadata row could not be written.
    #[error("Metadata persist error: {0}")]
    MetadataPersist(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Upload larger than the configured maximum.
    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file format, allowed: {}", format_extensions(.allowed))]
    UnsupportedFormat { allowed: Vec<String> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Render an extension list as `.wav, .mp3`.
pub fn format_extensions(allowed: &[String]) -> String {
    allowed
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Fixed presentation of one [`AppError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClass {
    pub status: u16,
    pub code: &'static str,
    pub recoverable: bool,
    pub suggested_action: Option<&'static str>,
    pub sensitive: bool,
    pub log_level: LogLevel,
}

impl ErrorClass {
    const fn client(status: u16, code: &'static str, action: &'static str) -> Self {
        Self {
            status,
            code,
            recoverable: false,
            suggested_action: Some(action),
            sensitive: false,
            log_level: LogLevel::Debug,
        }
    }

    const fn server(code: &'static str, action: &'static str) -> Self {
        Self {
            status: 500,
            code,
            recoverable: true,
            suggested_action: Some(action),
            sensitive: true,
            log_level: LogLevel::Error,
        }
    }
}

const RETRY_LATER: &str = "Retry after a short delay";
const RETRY_UPLOAD: &str = "Retry the upload after a short delay";

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Database(_) => ErrorClass::server("DATABASE_ERROR", RETRY_LATER),
            AppError::Storage(_) => ErrorClass::server("STORAGE_ERROR", RETRY_UPLOAD),
            AppError::MetadataPersist(_) => {
                ErrorClass::server("METADATA_PERSIST_ERROR", RETRY_UPLOAD)
            }
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                ErrorClass::server("INTERNAL_ERROR", RETRY_LATER)
            }
            AppError::BadRequest(_) => {
                ErrorClass::client(400, "BAD_REQUEST", "Check request format and parameters")
            }
            AppError::NotFound(_) => {
                ErrorClass::client(404, "NOT_FOUND", "Refresh the history and try again")
            }
            // Size and format violations are plain validation failures, not 413/415.
            AppError::PayloadTooLarge(_) => ErrorClass::client(
                400,
                "PAYLOAD_TOO_LARGE",
                "Upload a smaller file",
            ),
            AppError::UnsupportedFormat { .. } => ErrorClass::client(
                400,
                "UNSUPPORTED_FORMAT",
                "Upload a file with one of the allowed extensions",
            ),
            AppError::Unauthorized(_) => ErrorClass::client(
                401,
                "UNAUTHORIZED",
                "Sign in again to obtain a fresh token",
            ),
        }
    }

    /// Variant name, reported as `error_type` outside production.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::MetadataPersist(_) => "MetadataPersist",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::UnsupportedFormat { .. } => "UnsupportedFormat",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by up to five `Caused by:` lines of the source chain.
    pub fn detailed_message(&self) -> String {
        const MAX_DEPTH: usize = 5;

        let mut chain = std::iter::successors(std::error::Error::source(self), |err| err.source());
        let mut details = self.to_string();
        for cause in chain.by_ref().take(MAX_DEPTH) {
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        if chain.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.class().status
    }

    fn error_code(&self) -> &'static str {
        self.class().code
    }

    fn is_recoverable(&self) -> bool {
        self.class().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.class().suggested_action
    }

    fn is_sensitive(&self) -> bool {
        self.class().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.class().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to upload file to storage".to_string(),
            AppError::MetadataPersist(_) => "Failed to save audio file metadata".to_string(),
            AppError::UnsupportedFormat { allowed } => format!(
                "Invalid file format. Allowed formats: {}",
                format_extensions(allowed)
            ),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_are_opaque_server_errors() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool timed out".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access database");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_failures_are_bad_requests() {
        let too_large = AppError::PayloadTooLarge("File size limit exceeded. Max size: 10 MB".to_string());
        assert_eq!(too_large.http_status_code(), 400);
        assert_eq!(too_large.error_code(), "PAYLOAD_TOO_LARGE");
        assert_eq!(
            too_large.client_message(),
            "File size limit exceeded. Max size: 10 MB"
        );

        let format = AppError::UnsupportedFormat {
            allowed: vec!["wav".to_string(), "mp3".to_string()],
        };
        assert_eq!(format.http_status_code(), 400);
        assert_eq!(format.error_code(), "UNSUPPORTED_FORMAT");
        assert_eq!(
            format.client_message(),
            "Invalid file format. Allowed formats: .wav, .mp3"
        );
        assert_eq!(format.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_persistence_failures_hide_details() {
        let storage = AppError::Storage("connection reset".to_string());
        assert_eq!(storage.http_status_code(), 500);
        assert!(storage.is_sensitive());
        assert_eq!(storage.client_message(), "Failed to upload file to storage");

        let metadata = AppError::MetadataPersist("unique violation".to_string());
        assert_eq!(metadata.error_code(), "METADATA_PERSIST_ERROR");
        assert_eq!(
            metadata.client_message(),
            "Failed to save audio file metadata"
        );
    }

    #[test]
    fn test_history_not_found_passes_its_message_through() {
        let err = AppError::NotFound("History entry not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert!(!err.is_recoverable());
        assert!(!err.is_sensitive());
        assert_eq!(err.client_message(), "History entry not found");
    }

    #[test]
    fn test_detailed_message_walks_source_chain() {
        let err = AppError::from(anyhow::anyhow!("socket closed").context("analysis channel"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error: analysis channel"));
        assert!(details.contains("Caused by:"));
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_format_extensions_tolerates_leading_dots() {
        let allowed = vec![".ogg".to_string(), "webm".to_string()];
        assert_eq!(format_extensions(&allowed), ".ogg, .webm");
    }
}
