//! VoiceGuard database layer
//!
//! Repository traits for the records the upload pipeline writes, with
//! PostgreSQL adapters and in-memory adapters for local runs and tests.

pub mod db;

pub use db::*;
