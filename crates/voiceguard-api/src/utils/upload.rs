//! Common utilities for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use voiceguard_core::constants::{AUDIO_FORM_FIELD, DEFAULT_CONTENT_TYPE, FALLBACK_FILENAME};
use voiceguard_core::AppError;
use voiceguard_storage::keys::split_extension;

/// File part of an upload form, not yet validated.
#[derive(Debug)]
pub struct MultipartFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

pub fn size_limit_message(max_size: usize) -> String {
    format!(
        "File size limit exceeded. Max size: {} MB",
        max_size / 1024 / 1024
    )
}

fn multipart_error(err: MultipartError, max_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(size_limit_message(max_size))
    } else {
        AppError::BadRequest(format!("Invalid file upload request: {}", err.body_text()))
    }
}

/// Extract the `audiofile` field from a multipart form.
/// Only one such field is accepted; other fields are ignored.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<MultipartFile, AppError> {
    let mut file: Option<MultipartFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size))?
    {
        if field.name() != Some(AUDIO_FORM_FIELD) {
            continue;
        }

        if file.is_some() {
            return Err(AppError::BadRequest(format!(
                "Invalid file upload request: send exactly one field named '{}'",
                AUDIO_FORM_FIELD
            )));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = field.bytes().await.map_err(|e| multipart_error(e, max_size))?;

        file = Some(MultipartFile {
            data,
            filename,
            content_type,
        });
    }

    file.ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid file upload request: missing file field '{}'",
            AUDIO_FORM_FIELD
        ))
    })
}

/// Reduce a client supplied filename to its last path component.
///
/// Both `/` and `\` separate components. Names with nothing usable left
/// become [`FALLBACK_FILENAME`].
pub fn clean_filename(raw: &str) -> String {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(size_limit_message(max_size)));
    }
    Ok(())
}

/// Validate the extension of a cleaned filename, case-insensitively.
/// Returns the lowercased extension without its dot.
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let (_, ext) = split_extension(filename);
    let extension = ext.trim_start_matches('.').to_lowercase();

    if extension.is_empty() || !allowed_extensions.iter().any(|allowed| *allowed == extension) {
        return Err(AppError::UnsupportedFormat {
            allowed: allowed_extensions.to_vec(),
        });
    }

    Ok(extension)
}
