//! Core orchestration layer for keil-sync
//!
//! Keeps a uVision project descriptor in step with the source tree on disk:
//!
//! - **SyncEngine**: create, refresh and rebuild file groups from folders,
//!   delete groups by pattern, and maintain the include-path list
//! - **Reporter**: injected sink for human-readable progress messages
//! - **SyncSettings**: per-project extension sets and default depth
//! - **Discovery**: locating a descriptor below a directory
//!
//! # Architecture
//!
//! ```text
//!        CLI / GUI
//!            |
//!        keil-core
//!            |
//!      +-----+--------+
//!      |              |
//!   keil-fs    keil-project
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keil_core::{SyncEngine, TracingReporter};
//!
//! let mut engine = SyncEngine::new(TracingReporter);
//! if engine.set_project("demo.uvprojx") {
//!     engine.clean_rebuild_group("Project", "src", 2);
//! }
//! ```

pub mod discovery;
pub mod engine;
pub mod error;
pub mod naming;
pub mod report;
pub mod settings;

pub use discovery::find_project_files;
pub use engine::{EngineState, OperationSummary, SyncEngine};
pub use error::{Error, Result};
pub use report::{CollectingReporter, Reporter, TracingReporter};
pub use settings::{SETTINGS_FILE_NAME, SyncSettings};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_file_not_found_displays_path() {
        let error = Error::FileNotFound {
            path: PathBuf::from("/work/demo.uvprojx"),
        };

        let display = format!("{}", error);
        assert!(
            display.contains("/work/demo.uvprojx"),
            "Error display should contain the path, got: {}",
            display
        );
    }

    #[test]
    fn error_from_fs_not_found_maps_to_file_not_found() {
        let error: Error = keil_fs::Error::not_found("/work/src").into();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }

    #[test]
    fn error_from_project_fs_is_unwrapped() {
        let inner = keil_project::Error::Fs(keil_fs::Error::not_found("/work/demo.uvprojx"));
        let error: Error = inner.into();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }
}
