//! keil-sync CLI
//!
//! Keeps a Keil uVision project descriptor in step with the source tree,
//! either through one-shot subcommands or an interactive shell.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;
mod reporter;
mod shell;

use std::path::Path;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;
    execute_command(cli.command.unwrap_or(Commands::Shell), cli.project.as_deref(), &cwd)
}

fn execute_command(cmd: Commands, project: Option<&Path>, cwd: &Path) -> Result<()> {
    match cmd {
        Commands::Shell => commands::run_shell(project, cwd),
        Commands::FindProject { dir } => commands::run_find_project(dir.as_deref().unwrap_or(cwd)),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "keil-sync", &mut std::io::stdout());
            Ok(())
        }
        Commands::CreateFilesGroup {
            path,
            max_depth,
            prefix,
        } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_create_files_group(&mut engine, &path, max_depth, prefix.as_deref())
        }
        Commands::RefreshGroup {
            name,
            path,
            max_depth,
        } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_refresh_group(&mut engine, &name, &path, max_depth)
        }
        Commands::CleanRebuildGroup {
            name,
            path,
            max_depth,
        } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_clean_rebuild_group(&mut engine, &name, &path, max_depth)
        }
        Commands::DelExistGroup { pattern } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_del_exist_group(&mut engine, &pattern)
        }
        Commands::AddIncludePath { path } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_add_include_path(&mut engine, &path)
        }
        Commands::DelIncludePath { pattern } => {
            let mut engine = commands::open_engine(project, cwd)?;
            commands::run_del_include_path(&mut engine, &pattern)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keil_test_utils::TestProject;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_refresh_group_with_explicit_project() {
        let project = TestProject::new();
        project.add_files(&["src/app/main.c", "src/app/main.h"]);

        let result = execute_command(
            Commands::RefreshGroup {
                name: "Project".into(),
                path: project.path("src"),
                max_depth: Some(1),
            },
            Some(project.descriptor_path()),
            project.root(),
        );

        assert!(result.is_ok());
        project.assert_descriptor_contains("<GroupName>Project/app</GroupName>");
        project.assert_descriptor_contains("src/app</IncludePath>");
    }

    #[test]
    fn test_project_discovered_from_working_directory() {
        let project = TestProject::new();
        project.add_file("lib/core.h");

        let result = execute_command(
            Commands::AddIncludePath {
                path: project.path("lib"),
            },
            None,
            project.root(),
        );

        assert!(result.is_ok());
        project.assert_descriptor_contains("<IncludePath>Inc;lib</IncludePath>");
    }

    #[test]
    fn test_engine_error_propagates() {
        let project = TestProject::new();

        let result = execute_command(
            Commands::DelExistGroup {
                pattern: "[unclosed".into(),
            },
            Some(project.descriptor_path()),
            project.root(),
        );

        assert!(matches!(
            result,
            Err(crate::error::CliError::Core(keil_core::Error::InvalidPattern { .. }))
        ));
    }

    #[test]
    fn test_find_project_in_empty_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();

        let result = execute_command(Commands::FindProject { dir: None }, None, dir.path());

        assert!(result.is_err());
    }
}
