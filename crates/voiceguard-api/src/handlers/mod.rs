pub mod audio_upload;
pub mod history;
