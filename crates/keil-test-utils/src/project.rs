//! [`TestProject`] builder for descriptor-sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::descriptor::MINIMAL_DESCRIPTOR;

/// Default descriptor file name inside a [`TestProject`].
pub const DESCRIPTOR_NAME: &str = "demo.uvprojx";

/// A temporary directory holding a descriptor and a source tree.
///
/// # Example
///
/// ```rust,no_run
/// use keil_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.add_file("src/drivers/uart.c");
/// project.assert_descriptor_contains("<GroupName>Startup</GroupName>");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    descriptor: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Temp directory with [`MINIMAL_DESCRIPTOR`] at its root.
    pub fn new() -> Self {
        Self::with_descriptor(DESCRIPTOR_NAME, MINIMAL_DESCRIPTOR)
    }

    /// Temp directory with `content` written at `relative` (parents created).
    pub fn with_descriptor(relative: &str, content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let descriptor = temp_dir.path().join(relative);
        if let Some(parent) = descriptor.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&descriptor, content).unwrap();
        Self {
            temp_dir,
            descriptor,
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of the descriptor.
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor
    }

    /// Absolute path of `relative` below the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Create a source file (and its parents) with placeholder content.
    pub fn add_file(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, format!("/* {relative} */\n")).unwrap();
        path
    }

    /// Create several source files at once.
    pub fn add_files(&self, relatives: &[&str]) {
        for relative in relatives {
            self.add_file(relative);
        }
    }

    /// Create an empty directory (and its parents).
    pub fn add_dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Current descriptor text on disk.
    pub fn read_descriptor(&self) -> String {
        fs::read_to_string(&self.descriptor)
            .unwrap_or_else(|_| panic!("Could not read descriptor: {}", self.descriptor.display()))
    }

    /// Overwrite the descriptor on disk.
    pub fn write_descriptor(&self, content: &str) {
        fs::write(&self.descriptor, content).unwrap();
    }

    /// Assert that the descriptor on disk contains `needle`.
    ///
    /// # Panics
    /// Panics with the full descriptor text if it does not.
    pub fn assert_descriptor_contains(&self, needle: &str) {
        let text = self.read_descriptor();
        assert!(
            text.contains(needle),
            "Descriptor does not contain expected content.\nExpected: {}\nActual: {}",
            needle,
            text
        );
    }

    /// Assert that the descriptor on disk does **not** contain `needle`.
    pub fn assert_descriptor_not_contains(&self, needle: &str) {
        let text = self.read_descriptor();
        assert!(
            !text.contains(needle),
            "Descriptor unexpectedly contains: {}\nActual: {}",
            needle,
            text
        );
    }
}
