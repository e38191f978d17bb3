//! Include path commands

use std::path::Path;

use colored::Colorize;
use keil_core::SyncEngine;

use super::print_summary;
use crate::error::Result;

pub fn run_add_include_path(engine: &mut SyncEngine, path: &Path) -> Result<()> {
    println!(
        "{} Collecting header folders under {}...",
        "=>".blue().bold(),
        path.display()
    );
    let summary = engine.try_add_include_paths(path)?;
    print_summary(&summary);
    print_include_paths(engine);
    Ok(())
}

pub fn run_del_include_path(engine: &mut SyncEngine, pattern: &str) -> Result<()> {
    let summary = engine.try_delete_include_paths(pattern)?;
    print_summary(&summary);
    print_include_paths(engine);
    Ok(())
}

fn print_include_paths(engine: &SyncEngine) {
    let Some(document) = engine.document() else {
        return;
    };
    let paths = document.include_paths();
    if paths.is_empty() {
        println!("   {}", "(no include paths)".dimmed());
    } else {
        println!("   {} {}", "include:".dimmed(), paths);
    }
}
