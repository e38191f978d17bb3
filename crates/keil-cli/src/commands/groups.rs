//! File group commands

use std::path::Path;

use colored::Colorize;
use keil_core::SyncEngine;

use super::print_summary;
use crate::error::Result;

pub fn run_create_files_group(
    engine: &mut SyncEngine,
    path: &Path,
    max_depth: usize,
    prefix: Option<&str>,
) -> Result<()> {
    println!(
        "{} Creating file groups from {}...",
        "=>".blue().bold(),
        path.display()
    );
    let summary = engine.try_create_group(path, max_depth, prefix)?;
    print_summary(&summary);
    Ok(())
}

pub fn run_refresh_group(
    engine: &mut SyncEngine,
    name: &str,
    path: &Path,
    max_depth: Option<usize>,
) -> Result<()> {
    let depth = max_depth.unwrap_or_else(|| engine.default_max_depth());
    println!(
        "{} Refreshing group {} from {} (depth {})...",
        "=>".blue().bold(),
        name.cyan(),
        path.display(),
        depth
    );
    let summary = engine.try_refresh_group(name, path, depth)?;
    print_summary(&summary);
    Ok(())
}

pub fn run_clean_rebuild_group(
    engine: &mut SyncEngine,
    name: &str,
    path: &Path,
    max_depth: Option<usize>,
) -> Result<()> {
    let depth = max_depth.unwrap_or_else(|| engine.default_max_depth());
    println!(
        "{} Rebuilding group {} from {} (depth {})...",
        "=>".blue().bold(),
        name.cyan(),
        path.display(),
        depth
    );
    let summary = engine.try_clean_rebuild_group(name, path, depth)?;
    print_summary(&summary);
    Ok(())
}

pub fn run_del_exist_group(engine: &mut SyncEngine, pattern: &str) -> Result<()> {
    let summary = engine.try_delete_groups(pattern)?;
    if summary.groups_removed.is_empty() {
        println!(
            "{} No groups match {}",
            "OK".green().bold(),
            pattern.yellow()
        );
    } else {
        print_summary(&summary);
    }
    Ok(())
}
