//! Shared key generation for storage backends.
//!
//! Key format: `{user_id}/{timestamp_nanos}/{safe_base}{.ext}`.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

static LAST_KEY_NANOS: AtomicI64 = AtomicI64::new(0);

/// Wall clock nanoseconds, bumped so that no two calls in this process return
/// the same value.
pub fn monotonic_nanos() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let previous = LAST_KEY_NANOS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

/// Split `name` into stem and extension (with the dot) at the last `.`.
///
/// `"clip.WAV"` gives `("clip", ".WAV")`; a name without a dot has an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Lowercase the stem, turn whitespace into `_` and replace anything that is
/// not alphanumeric, `-`, `_` or `.` with `_`.
///
/// The result never starts or ends with `.` and never holds `..`, so the key
/// stays valid once the extension is appended.
pub fn safe_base_name(stem: &str) -> String {
    let safe: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_matches('.');

    if safe.is_empty() {
        "audio".to_string()
    } else {
        safe.replace("..", "_")
    }
}

/// Generate the storage key for a cleaned upload filename owned by `user_id`.
pub fn generate_audio_key(user_id: Uuid, filename: &str) -> String {
    let (stem, ext) = split_extension(filename);
    format!(
        "{}/{}/{}{}",
        user_id,
        monotonic_nanos(),
        safe_base_name(stem),
        ext.to_lowercase()
    )
}
