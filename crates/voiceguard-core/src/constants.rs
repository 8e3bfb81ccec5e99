//! Shared constants for uploads and analysis.

use std::time::Duration;

/// Default upload ceiling in MiB when `MAX_AUDIO_SIZE_MB` is unset.
pub const DEFAULT_MAX_AUDIO_SIZE_MB: usize = 10;

/// Extensions accepted for audio uploads, without the leading dot.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "webm"];

/// Multipart field that carries the uploaded audio file.
pub const AUDIO_FORM_FIELD: &str = "audiofile";

/// Used when the client sends no usable filename.
pub const FALLBACK_FILENAME: &str = "uploaded_file";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Fixed bound on one remote analysis call, independent of the HTTP request.
pub const ANALYSIS_DEADLINE: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_ANALYZER_ADDR: &str = "http://localhost:50051";

/// Multipart framing overhead allowed on top of the file size limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
