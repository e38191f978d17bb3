//! Descriptor sync engine
//!
//! [`SyncEngine`] owns at most one loaded descriptor. Every mutating
//! operation works on a copy of the document and swaps it in only after
//! the single write to disk succeeded, so a failed operation leaves both
//! the file and the in-memory state as they were.
//!
//! Each operation comes in two forms: `try_*` returns the typed error and an
//! [`OperationSummary`], while the plain form reports the outcome through the
//! injected [`Reporter`] and returns a success flag.

use std::collections::HashSet;
use std::path::Path;

use keil_fs::{NormalizedPath, TreeWalker, compile_pattern, relative_to_file};
use keil_project::DescriptorDocument;

use crate::discovery::{find_project_files, is_descriptor};
use crate::naming::{prefixed_group_name, sub_group_name};
use crate::report::Reporter;
use crate::settings::SyncSettings;
use crate::{Error, Result};

/// Whether a descriptor is currently parsed and usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unloaded,
    Loaded,
}

/// What a successful operation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSummary {
    /// Groups written by the operation, in creation order.
    pub groups_created: Vec<String>,
    /// Groups removed by the operation, in removal order.
    pub groups_removed: Vec<String>,
    /// File entries actually appended; duplicates are not counted.
    pub files_added: usize,
    pub include_paths_added: usize,
    pub include_paths_removed: Vec<String>,
}

impl OperationSummary {
    /// True when the operation found nothing to change.
    pub fn is_noop(&self) -> bool {
        self.groups_created.is_empty()
            && self.groups_removed.is_empty()
            && self.files_added == 0
            && self.include_paths_added == 0
            && self.include_paths_removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebuildMode {
    Refresh,
    Clean,
}

struct LoadedProject {
    document: DescriptorDocument,
    settings: SyncSettings,
}

/// Keeps one project descriptor in step with folders on disk.
pub struct SyncEngine {
    reporter: Box<dyn Reporter>,
    walker: TreeWalker,
    project_path: Option<NormalizedPath>,
    loaded: Option<LoadedProject>,
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("project_path", &self.project_path)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SyncEngine {
    /// Create an unloaded engine reporting through `reporter`.
    pub fn new(reporter: impl Reporter + 'static) -> Self {
        Self {
            reporter: Box::new(reporter),
            walker: TreeWalker::new(),
            project_path: None,
            loaded: None,
        }
    }

    /// Replace the directory walker, e.g. to follow symlinks.
    pub fn with_walker(mut self, walker: TreeWalker) -> Self {
        self.walker = walker;
        self
    }

    pub fn state(&self) -> EngineState {
        if self.loaded.is_some() {
            EngineState::Loaded
        } else {
            EngineState::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The recorded descriptor path. May be set while the engine is unloaded
    /// if the last load failed.
    pub fn project_path(&self) -> Option<&NormalizedPath> {
        self.project_path.as_ref()
    }

    /// The in-memory document, matching what is on disk.
    pub fn document(&self) -> Option<&DescriptorDocument> {
        self.loaded.as_ref().map(|l| &l.document)
    }

    pub fn settings(&self) -> Option<&SyncSettings> {
        self.loaded.as_ref().map(|l| &l.settings)
    }

    /// Depth front ends should use when the user gives none.
    pub fn default_max_depth(&self) -> usize {
        self.settings()
            .map(|s| s.default_max_depth)
            .unwrap_or_else(|| SyncSettings::default().default_max_depth)
    }

    // ---------------------------------------------------------------------
    // Project lifecycle
    // ---------------------------------------------------------------------

    /// Record `path` as the descriptor and load it.
    ///
    /// On a missing file or wrong extension nothing changes. On a parse
    /// failure the path stays recorded but the engine is unloaded.
    pub fn try_set_project(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = NormalizedPath::absolute(path)?;
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.to_native(),
            });
        }
        if !is_descriptor(&path) {
            return Err(Error::InvalidFormat {
                path: path.to_native(),
            });
        }

        self.project_path = Some(path.clone());
        self.report(&format!("Project file set: {}", path));
        self.load()
    }

    pub fn set_project(&mut self, path: impl AsRef<Path>) -> bool {
        let result = self.try_set_project(path);
        self.finish("Load project", result, |_| String::new())
    }

    /// Forget the descriptor and drop the loaded document.
    pub fn unset_project(&mut self) {
        if let Some(path) = self.project_path.take() {
            self.report(&format!("Project file unset: {}", path));
        }
        self.loaded = None;
    }

    /// Look for exactly one descriptor below `dir`.
    ///
    /// Returns `None` when there are none or several; engine state is
    /// untouched either way.
    pub fn discover_project(&self, dir: impl AsRef<Path>) -> Option<NormalizedPath> {
        let dir = dir.as_ref();
        let found = match find_project_files(dir) {
            Ok(found) => found,
            Err(e) => {
                self.report(&format!("Project search failed: {}", e));
                return None;
            }
        };

        match found.as_slice() {
            [one] => {
                self.report(&format!("Found project file: {}", one));
                Some(one.clone())
            }
            [] => {
                self.report(&format!("No project file found under {}", dir.display()));
                None
            }
            many => {
                self.report(&format!(
                    "Found {} project files under {}; choose one with set_project",
                    many.len(),
                    dir.display()
                ));
                None
            }
        }
    }

    /// Reload the recorded descriptor, or discover one below `search_dir`
    /// when none is recorded.
    pub fn try_refresh_project_from(
        &mut self,
        search_dir: impl AsRef<Path>,
    ) -> Result<NormalizedPath> {
        if let Some(path) = self.project_path.clone() {
            self.load()?;
            return Ok(path);
        }

        let path = self.discover_project(search_dir).ok_or(Error::NotLoaded)?;
        self.try_set_project(&path)?;
        Ok(path)
    }

    /// [`Self::try_refresh_project_from`] searching the working directory.
    pub fn try_refresh_project(&mut self) -> Result<NormalizedPath> {
        let cwd = std::env::current_dir().map_err(|e| keil_fs::Error::io(".", e))?;
        self.try_refresh_project_from(cwd)
    }

    pub fn refresh_project(&mut self) -> bool {
        let result = self.try_refresh_project();
        self.finish("Refresh project", result, |_| String::new())
    }

    pub fn refresh_project_from(&mut self, search_dir: impl AsRef<Path>) -> bool {
        let result = self.try_refresh_project_from(search_dir);
        self.finish("Refresh project", result, |_| String::new())
    }

    fn load(&mut self) -> Result<()> {
        let path = self.project_path.clone().ok_or(Error::NotLoaded)?;
        self.loaded = None;

        let document = DescriptorDocument::load(&path)?;
        let settings = SyncSettings::load_beside(&path)?;

        let groups = document.group_names().len();
        tracing::info!(path = %path, groups, "Loaded project descriptor");
        self.report(&format!("Loaded project with {} groups", groups));

        self.loaded = Some(LoadedProject { document, settings });
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Group operations
    // ---------------------------------------------------------------------

    /// Add a group per source-bearing folder found under `path`.
    ///
    /// Existing groups are extended, never removed. Files already present
    /// by name are skipped.
    pub fn try_create_group(
        &mut self,
        path: impl AsRef<Path>,
        max_depth: usize,
        prefix: Option<&str>,
    ) -> Result<OperationSummary> {
        let path = path.as_ref();
        self.transact(|engine, settings, doc| {
            let root = NormalizedPath::absolute(path)?;
            let extensions = settings.group_extensions();
            let mut summary = OperationSummary::default();
            let mut populated = 0usize;

            for folder in engine.walker.enumerate_bounded(&root, max_depth)? {
                let files = engine.walker.find_files(&folder, &extensions)?;
                if files.is_empty() {
                    continue;
                }

                let name = prefixed_group_name(&folder, &root, prefix)?;
                let existed = doc.has_group(&name);
                let mut group = doc.get_or_create_group(&name)?;
                let added = files.iter().filter(|f| group.add_file(f)).count();

                tracing::debug!(group = %name, added, existed, "Populated group");
                summary.files_added += added;
                if !existed {
                    summary.groups_created.push(name);
                }
                populated += 1;
            }

            if populated == 0 {
                tracing::warn!(root = %root, max_depth, "No source files found under scan root");
            }
            Ok(summary)
        })
    }

    pub fn create_group(
        &mut self,
        path: impl AsRef<Path>,
        max_depth: usize,
        prefix: Option<&str>,
    ) -> bool {
        let result = self.try_create_group(path, max_depth, prefix);
        self.finish("Create file groups", result, |s| {
            format!(
                "Created file groups: {} new groups, {} files added",
                s.groups_created.len(),
                s.files_added
            )
        })
    }

    /// Regenerate the sub-tree of groups named `group` from `path`.
    ///
    /// Groups named `group` or `group/...` are removed, then one group per
    /// folder is rebuilt with sources and headers. Include paths for header
    /// folders under `path` are merged in the same write.
    pub fn try_refresh_group(
        &mut self,
        group: &str,
        path: impl AsRef<Path>,
        max_depth: usize,
    ) -> Result<OperationSummary> {
        self.rebuild(group, path.as_ref(), max_depth, RebuildMode::Refresh)
    }

    pub fn refresh_group(&mut self, group: &str, path: impl AsRef<Path>, max_depth: usize) -> bool {
        let result = self.try_refresh_group(group, path, max_depth);
        self.finish("Refresh group", result, |s| {
            format!(
                "Refreshed '{}': {} groups, {} files, {} new include paths",
                group,
                s.groups_created.len(),
                s.files_added,
                s.include_paths_added
            )
        })
    }

    /// Like [`Self::try_refresh_group`], creating groups shallowest first.
    pub fn try_clean_rebuild_group(
        &mut self,
        group: &str,
        path: impl AsRef<Path>,
        max_depth: usize,
    ) -> Result<OperationSummary> {
        self.rebuild(group, path.as_ref(), max_depth, RebuildMode::Clean)
    }

    pub fn clean_rebuild_group(
        &mut self,
        group: &str,
        path: impl AsRef<Path>,
        max_depth: usize,
    ) -> bool {
        let result = self.try_clean_rebuild_group(group, path, max_depth);
        self.finish("Clean rebuild", result, |s| {
            format!(
                "Rebuilt '{}': removed {}, created {} groups with {} files",
                group,
                s.groups_removed.len(),
                s.groups_created.len(),
                s.files_added
            )
        })
    }

    /// Remove every group whose name contains a match for `pattern`.
    pub fn try_delete_groups(&mut self, pattern: &str) -> Result<OperationSummary> {
        self.transact(|_, _, doc| {
            let regex = compile_pattern(pattern)?;
            let groups_removed = doc.remove_groups_matching(|name| regex.is_match(name));
            Ok(OperationSummary {
                groups_removed,
                ..Default::default()
            })
        })
    }

    pub fn delete_groups(&mut self, pattern: &str) -> bool {
        let result = self.try_delete_groups(pattern);
        self.finish("Delete groups", result, |s| {
            if s.groups_removed.is_empty() {
                format!("No groups match '{}'", pattern)
            } else {
                format!("Deleted groups: {}", s.groups_removed.join(", "))
            }
        })
    }

    // ---------------------------------------------------------------------
    // Include paths
    // ---------------------------------------------------------------------

    /// Merge every header folder under `path` into the include-path list.
    pub fn try_add_include_paths(&mut self, path: impl AsRef<Path>) -> Result<OperationSummary> {
        let path = path.as_ref();
        self.transact(|engine, settings, doc| {
            let root = NormalizedPath::absolute(path)?;
            let include_paths_added = engine.sync_include_paths(settings, doc, &root)?;
            Ok(OperationSummary {
                include_paths_added,
                ..Default::default()
            })
        })
    }

    pub fn add_include_paths(&mut self, path: impl AsRef<Path>) -> bool {
        let result = self.try_add_include_paths(path);
        self.finish("Add include paths", result, |s| {
            format!("Added {} include paths", s.include_paths_added)
        })
    }

    /// Remove every include-path entry containing a match for `pattern`.
    pub fn try_delete_include_paths(&mut self, pattern: &str) -> Result<OperationSummary> {
        self.transact(|_, _, doc| {
            let regex = compile_pattern(pattern)?;
            let include_paths_removed =
                doc.remove_include_paths_matching(|entry| regex.is_match(entry))?;
            Ok(OperationSummary {
                include_paths_removed,
                ..Default::default()
            })
        })
    }

    pub fn delete_include_paths(&mut self, pattern: &str) -> bool {
        let result = self.try_delete_include_paths(pattern);
        self.finish("Delete include paths", result, |s| {
            format!("Removed {} include paths", s.include_paths_removed.len())
        })
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn rebuild(
        &mut self,
        group: &str,
        path: &Path,
        max_depth: usize,
        mode: RebuildMode,
    ) -> Result<OperationSummary> {
        self.transact(|engine, settings, doc| {
            let root = NormalizedPath::absolute(path)?;
            let mut folders = engine.walker.enumerate_bounded(&root, max_depth)?;
            if mode == RebuildMode::Clean {
                folders.sort_by_key(NormalizedPath::depth);
            }

            let mut summary = OperationSummary {
                groups_removed: doc.remove_groups_by_prefix(group),
                ..Default::default()
            };
            if !summary.groups_removed.is_empty() {
                engine.report(&format!(
                    "Cleared old groups: {}",
                    summary.groups_removed.join(", ")
                ));
            }

            let extensions = settings.tracked_extensions();
            let mut seen = HashSet::new();
            for folder in &folders {
                let files = engine.walker.find_files(folder, &extensions)?;
                if files.is_empty() {
                    continue;
                }

                let name = sub_group_name(group, folder, &root);
                if !seen.insert(name.clone()) {
                    continue;
                }

                let mut target = doc.get_or_create_group(&name)?;
                if mode == RebuildMode::Refresh {
                    target.clear_files();
                }
                let added = files.iter().filter(|f| target.add_file(f)).count();

                if mode == RebuildMode::Clean {
                    engine.report(&format!("Created group '{}' with {} files", name, added));
                }
                summary.files_added += added;
                summary.groups_created.push(name);
            }

            if summary.groups_created.is_empty() {
                tracing::warn!(root = %root, max_depth, "No source files found under scan root");
            }
            summary.include_paths_added = engine.sync_include_paths(settings, doc, &root)?;
            Ok(summary)
        })
    }

    fn sync_include_paths(
        &self,
        settings: &SyncSettings,
        doc: &mut DescriptorDocument,
        root: &NormalizedPath,
    ) -> Result<usize> {
        let folders = self
            .walker
            .find_folders_containing(root, &settings.header_extensions)?;
        let relative: Vec<String> = folders
            .iter()
            .map(|folder| relative_to_file(folder, doc.path()))
            .collect();
        Ok(doc.add_include_paths(relative)?)
    }

    /// Run `op` against a copy of the document and commit it only if the
    /// write to disk succeeds.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&Self, &SyncSettings, &mut DescriptorDocument) -> Result<T>,
    ) -> Result<T> {
        let loaded = self.loaded.as_ref().ok_or(Error::NotLoaded)?;
        let mut draft = loaded.document.clone();
        let settings = loaded.settings.clone();

        let value = op(self, &settings, &mut draft)?;

        draft.save().map_err(|e| Error::PersistenceFailure {
            path: draft.path().to_native(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %draft.path(), "Saved project descriptor");

        if let Some(loaded) = self.loaded.as_mut() {
            loaded.document = draft;
        }
        Ok(value)
    }

    fn finish<T>(
        &self,
        action: &str,
        result: Result<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> bool {
        match result {
            Ok(value) => {
                let message = describe(&value);
                if !message.is_empty() {
                    self.report(&message);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "{} failed", action);
                self.report(&format!("{} failed: {}", action, e));
                false
            }
        }
    }

    fn report(&self, message: &str) {
        self.reporter.report(message);
    }
}
