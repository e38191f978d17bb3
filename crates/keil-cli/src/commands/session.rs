//! Interactive shell entry point

use std::io;
use std::path::Path;

use colored::Colorize;
use keil_core::{SyncEngine, find_project_files};

use crate::context::Ambiguity;
use crate::error::Result;
use crate::interactive;
use crate::reporter::ConsoleReporter;
use crate::shell::Shell;

/// Load a project if one can be found, then hand stdin to the shell.
pub fn run_shell(explicit: Option<&Path>, cwd: &Path) -> Result<()> {
    let mut engine = SyncEngine::new(ConsoleReporter::new());
    autoload(&mut engine, explicit, cwd)?;

    let stdin = io::stdin();
    let mut shell = Shell::new(engine, stdin.lock(), io::stdout());
    shell.run()?;
    Ok(())
}

fn autoload(engine: &mut SyncEngine, explicit: Option<&Path>, cwd: &Path) -> Result<()> {
    if let Some(path) = explicit {
        engine.set_project(path);
        return Ok(());
    }

    let candidates = find_project_files(cwd)?;
    let chosen = match candidates.as_slice() {
        [] => None,
        [one] => Some(one.clone()),
        _ if Ambiguity::detect() == Ambiguity::Prompt => {
            Some(interactive::pick_project(&candidates)?)
        }
        _ => engine.discover_project(cwd),
    };

    match chosen {
        Some(path) => {
            engine.set_project(&path);
        }
        None => println!(
            "{} No project loaded. Use 'set_project <path>' to choose a .uvprojx file.",
            "=>".yellow().bold()
        ),
    }
    Ok(())
}
