//! Error types for keil-project

use std::path::PathBuf;

/// Result type for keil-project operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in keil-project operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse descriptor {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Descriptor has no <{node}> element")]
    MissingNode { node: &'static str },

    #[error("Failed to serialize descriptor: {message}")]
    Serialize { message: String },

    #[error(transparent)]
    Fs(#[from] keil_fs::Error),
}
