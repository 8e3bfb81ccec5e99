//! Database repositories for data access layer
//!
//! One trait per store. `Postgres*` types are the production adapters,
//! `InMemory*` types back tests and database-less development runs.

pub mod audio_file;
pub mod history;
pub mod memory;
pub mod user;

pub use audio_file::{AudioFileRepositoryTrait, PostgresAudioFileRepository};
pub use history::{HistoryRepositoryTrait, PostgresHistoryRepository, HISTORY_NOT_FOUND_MESSAGE};
pub use memory::{InMemoryAudioFileRepository, InMemoryHistoryRepository, InMemoryUserRepository};
pub use user::{PostgresUserRepository, UserRepositoryTrait};
