//! Error types for keil-core

use std::path::PathBuf;

/// Result type for keil-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in keil-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor or scan directory does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a `.uvprojx` descriptor
    #[error("Not a uVision project file: {path}")]
    InvalidFormat { path: PathBuf },

    /// Mutating operation attempted without a loaded descriptor
    #[error("No project loaded; set a project file first")]
    NotLoaded,

    /// Group or include-path pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Writing the descriptor back failed; the previous file is intact
    #[error("Failed to save {path}: {message}")]
    PersistenceFailure { path: PathBuf, message: String },

    /// A scanned folder does not sit under the root being renamed
    #[error("Folder {folder} is not under scan root {root}")]
    GroupPrefixMismatch { root: String, folder: String },

    /// `keil-sync.toml` could not be read or parsed
    #[error("Invalid settings: {message}")]
    Settings { message: String },

    /// Filesystem error from keil-fs
    #[error(transparent)]
    Fs(keil_fs::Error),

    /// Descriptor error from keil-project
    #[error(transparent)]
    Project(keil_project::Error),
}

impl From<keil_fs::Error> for Error {
    fn from(err: keil_fs::Error) -> Self {
        match err {
            keil_fs::Error::NotFound { path } => Self::FileNotFound { path },
            keil_fs::Error::InvalidPattern { pattern, message } => {
                Self::InvalidPattern { pattern, message }
            }
            other => Self::Fs(other),
        }
    }
}

impl From<keil_project::Error> for Error {
    fn from(err: keil_project::Error) -> Self {
        match err {
            keil_project::Error::Fs(inner) => inner.into(),
            other => Self::Project(other),
        }
    }
}
