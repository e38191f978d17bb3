//! Project loading and discovery commands

use std::path::Path;

use colored::Colorize;
use keil_core::{SyncEngine, find_project_files};

use crate::context::{Ambiguity, locate_project};
use crate::error::{CliError, Result};
use crate::reporter::ConsoleReporter;

/// Resolve and load the project for a one-shot command.
pub fn open_engine(explicit: Option<&Path>, cwd: &Path) -> Result<SyncEngine> {
    let path = locate_project(explicit, cwd, Ambiguity::detect())?;
    let mut engine = SyncEngine::new(ConsoleReporter::new());
    engine.try_set_project(&path)?;
    Ok(engine)
}

/// List every project file below `dir`.
pub fn run_find_project(dir: &Path) -> Result<()> {
    let found = find_project_files(dir)?;
    if found.is_empty() {
        return Err(CliError::user(format!(
            "No .uvprojx file found under {}",
            dir.display()
        )));
    }

    println!(
        "{} Found {} project file(s):",
        "=>".blue().bold(),
        found.len()
    );
    for path in &found {
        println!("   {}", path.as_str().cyan());
    }
    Ok(())
}
