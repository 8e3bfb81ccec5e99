//! VoiceGuard Storage Library
//!
//! Blob storage for uploaded audio. Provides the [`Storage`] trait with an S3
//! (object_store, MinIO compatible) backend and a local filesystem backend.
//!
//! # Storage key format
//!
//! `{user_id}/{timestamp_nanos}/{safe_base}{.ext}`. Keys never contain `..` or a
//! leading `/`. Key generation lives in [`keys`] so every backend agrees.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

pub use factory::create_storage;
pub use keys::generate_audio_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use voiceguard_core::StorageBackend;
