//! Per-project sync settings
//!
//! An optional `keil-sync.toml` next to the descriptor overrides the
//! extension sets and default depth. Every field is optional.
//!
//! ```toml
//! source_extensions = [".c", ".cpp", ".cc"]
//! include_assembly = true
//! default_max_depth = 2
//! ```

use keil_fs::constants::{
    ASSEMBLY_EXTENSIONS, DEFAULT_MAX_DEPTH, HEADER_EXTENSIONS, SOURCE_EXTENSIONS,
};
use keil_fs::{NormalizedPath, read_toml_optional};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File name looked up beside the descriptor.
pub const SETTINGS_FILE_NAME: &str = "keil-sync.toml";

/// Extension sets and defaults used by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Suffixes added by `create_group`.
    pub source_extensions: Vec<String>,
    /// Suffixes added alongside sources on refresh and rebuild, and used to
    /// find include folders.
    pub header_extensions: Vec<String>,
    /// Assembly suffixes, only scanned when `include_assembly` is set.
    pub assembly_extensions: Vec<String>,
    pub include_assembly: bool,
    /// Depth used by front ends when none is given.
    pub default_max_depth: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            source_extensions: owned(SOURCE_EXTENSIONS),
            header_extensions: owned(HEADER_EXTENSIONS),
            assembly_extensions: owned(ASSEMBLY_EXTENSIONS),
            include_assembly: false,
            default_max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SyncSettings {
    /// Load `keil-sync.toml` from the descriptor's folder, or defaults if absent.
    pub fn load_beside(descriptor: &NormalizedPath) -> Result<Self> {
        let Some(dir) = descriptor.parent() else {
            return Ok(Self::default());
        };
        let path = dir.join(SETTINGS_FILE_NAME);

        let loaded = read_toml_optional::<Self>(&path).map_err(|e| Error::Settings {
            message: e.to_string(),
        })?;

        match loaded {
            Some(settings) => {
                tracing::debug!(path = %path, "Loaded sync settings");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Suffixes scanned by `create_group`.
    pub fn group_extensions(&self) -> Vec<String> {
        let mut exts = self.source_extensions.clone();
        self.push_assembly(&mut exts);
        exts
    }

    /// Suffixes scanned by refresh and rebuild.
    pub fn tracked_extensions(&self) -> Vec<String> {
        let mut exts = self.source_extensions.clone();
        exts.extend(self.header_extensions.iter().cloned());
        self.push_assembly(&mut exts);
        exts
    }

    fn push_assembly(&self, exts: &mut Vec<String>) {
        if self.include_assembly {
            exts.extend(self.assembly_extensions.iter().cloned());
        }
    }
}

fn owned(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|e| e.to_string()).collect()
}
