//! Locating project descriptors on disk

use std::path::Path;

use keil_fs::{NormalizedPath, PROJECT_FILE_EXTENSION};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Every `.uvprojx` file below `dir`, recursively, sorted by path.
///
/// The extension matches case-insensitively. Unreadable subdirectories are
/// skipped.
pub fn find_project_files(dir: impl AsRef<Path>) -> Result<Vec<NormalizedPath>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut found: Vec<NormalizedPath> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable entry during discovery");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_descriptor(entry.path()))
        .map(|entry| NormalizedPath::new(entry.path()))
        .collect();
    found.sort();

    tracing::debug!(dir = %dir.display(), count = found.len(), "Descriptor discovery");
    Ok(found)
}

/// Whether `path` carries the descriptor extension.
pub fn is_descriptor(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION))
}
