//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection.

use std::io::IsTerminal;

use dialoguer::Select;
use keil_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Let the user choose one of several project files.
pub fn pick_project(candidates: &[NormalizedPath]) -> Result<NormalizedPath> {
    let items: Vec<&str> = candidates.iter().map(NormalizedPath::as_str).collect();

    let choice = Select::new()
        .with_prompt("Several project files found; choose one")
        .items(&items)
        .default(0)
        .interact_opt()?;

    match choice {
        Some(index) => Ok(candidates[index].clone()),
        None => Err(CliError::user("No project file selected.")),
    }
}
