//! Project file resolution
//!
//! Decides which descriptor a command works on: the explicit `--project`
//! value, or the single `.uvprojx` found below the working directory.

use std::path::Path;

use keil_core::find_project_files;
use keil_fs::NormalizedPath;

use crate::error::{CliError, Result};
use crate::interactive;

/// How several candidates are narrowed down to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// Ask the user to pick.
    Prompt,
    /// Fail with the list of candidates.
    Reject,
}

impl Ambiguity {
    /// Prompt only when attached to a terminal.
    pub fn detect() -> Self {
        if interactive::is_interactive() {
            Self::Prompt
        } else {
            Self::Reject
        }
    }
}

/// Resolve the descriptor to use.
pub fn locate_project(
    explicit: Option<&Path>,
    search_dir: &Path,
    ambiguity: Ambiguity,
) -> Result<NormalizedPath> {
    if let Some(path) = explicit {
        return Ok(NormalizedPath::absolute(path)?);
    }

    let mut candidates = find_project_files(search_dir)?;
    match candidates.len() {
        0 => Err(CliError::user(format!(
            "No .uvprojx file found under {}. Pass --project <path>.",
            search_dir.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ if ambiguity == Ambiguity::Prompt => interactive::pick_project(&candidates),
        n => {
            let listing: Vec<&str> = candidates.iter().map(NormalizedPath::as_str).collect();
            Err(CliError::user(format!(
                "Multiple .uvprojx files found ({}): {}. Pass --project <path>.",
                n,
                listing.join(", ")
            )))
        }
    }
}
