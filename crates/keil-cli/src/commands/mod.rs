//! Command implementations for keil-sync

pub mod groups;
pub mod include;
pub mod project;
pub mod session;

pub use groups::{
    run_clean_rebuild_group, run_create_files_group, run_del_exist_group, run_refresh_group,
};
pub use include::{run_add_include_path, run_del_include_path};
pub use project::{open_engine, run_find_project};
pub use session::run_shell;

use colored::Colorize;
use keil_core::OperationSummary;

/// Print what an operation changed, one line per group or path.
pub(crate) fn print_summary(summary: &OperationSummary) {
    if summary.is_noop() {
        println!("{} Nothing to change.", "OK".green().bold());
        return;
    }

    for name in &summary.groups_removed {
        println!("   {} {}", "-".red(), name);
    }
    for name in &summary.groups_created {
        println!("   {} {}", "+".green(), name.cyan());
    }
    for path in &summary.include_paths_removed {
        println!("   {} include {}", "-".red(), path);
    }

    println!(
        "{} {} groups written, {} removed, {} files added, {} include paths added, {} removed",
        "OK".green().bold(),
        summary.groups_created.len(),
        summary.groups_removed.len(),
        summary.files_added,
        summary.include_paths_added,
        summary.include_paths_removed.len()
    );
}
