//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// keil-sync - keep a Keil uVision project in step with your source tree
#[derive(Parser, Debug)]
#[command(name = "keil-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project file (.uvprojx); searched for below the working directory if omitted
    #[arg(short, long, global = true, env = "KEIL_SYNC_PROJECT")]
    pub project: Option<PathBuf>,

    /// The command to run; starts the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add a file group for every source folder under PATH
    ///
    /// Groups are named after the folder path, or after PREFIX followed by
    /// the folder's path below PATH. Existing groups are extended, never removed.
    ///
    /// Examples:
    ///   keil-sync create-files-group src 2            # groups named by folder path
    ///   keil-sync create-files-group src 2 Project    # Project/app, Project/drivers
    CreateFilesGroup {
        /// Folder to scan
        path: PathBuf,

        /// Maximum folder depth below PATH
        max_depth: usize,

        /// Replace PATH with this prefix in group names
        prefix: Option<String>,
    },

    /// Regenerate the groups NAME and NAME/... from PATH
    ///
    /// Sources and headers are added, and header folders become include paths.
    RefreshGroup {
        /// Group name root
        name: String,

        /// Folder to scan
        path: PathBuf,

        /// Maximum folder depth below PATH (defaults to the project setting, 3)
        max_depth: Option<usize>,
    },

    /// Remove the groups NAME and NAME/..., then rebuild them shallowest first
    CleanRebuildGroup {
        /// Group name root
        name: String,

        /// Folder to scan
        path: PathBuf,

        /// Maximum folder depth below PATH (defaults to the project setting, 3)
        max_depth: Option<usize>,
    },

    /// Delete every group whose name matches a regular expression
    DelExistGroup {
        /// Regular expression searched for in each group name
        pattern: String,
    },

    /// Add every folder under PATH that holds headers to the include paths
    AddIncludePath {
        /// Folder to scan
        path: PathBuf,
    },

    /// Delete include paths matching a regular expression
    DelIncludePath {
        /// Regular expression searched for in each include path
        pattern: String,
    },

    /// List project files found below a directory
    FindProject {
        /// Directory to search (defaults to the working directory)
        dir: Option<PathBuf>,
    },

    /// Start the interactive shell
    Shell,

    /// Generate shell completions
    ///
    /// Examples:
    ///   keil-sync completions bash > ~/.local/share/bash-completion/completions/keil-sync
    ///   keil-sync completions zsh > ~/.zfunc/_keil-sync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
