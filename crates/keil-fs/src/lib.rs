//! Filesystem layer for keil-sync
//!
//! Provides slash-normalized path handling, bounded directory walking,
//! pattern validation and safe (atomic) persistence.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod pattern;
pub mod walker;

pub use config::read_toml_optional;
pub use constants::{FileType, PROJECT_FILE_EXTENSION};
pub use error::{Error, Result};
pub use path::{NormalizedPath, relative_to_file};
pub use pattern::compile_pattern;
pub use walker::{FoundFile, TreeWalker};
