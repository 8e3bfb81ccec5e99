//! Data models for the application
//!
//! One sub-module per record the pipeline handles.

mod analysis;
mod audio;
mod history;
mod upload;

pub use analysis::*;
pub use audio::*;
pub use history::*;
pub use upload::*;
