//! Directory traversal for group and include-path discovery
//!
//! All listings are sorted by file name so repeated scans of an unchanged
//! tree produce identical output (and identical descriptor content).

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, FileType, NormalizedPath, Result};

/// A file found by [`TreeWalker::find_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    /// File name including extension, e.g. `uart.c`
    pub name: String,
    /// Absolute, slash-normalized path
    pub path: NormalizedPath,
    /// Type derived from the suffix
    pub file_type: FileType,
}

/// An immediate subdirectory and whether it is reached through a symlink.
struct ChildDir {
    path: NormalizedPath,
    linked: bool,
}

/// Directory walker.
///
/// Symlinked directories are listed (and emitted at the depth boundary) but
/// not descended into unless [`TreeWalker::follow_links`] is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker {
    follow_links: bool,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symlinked directories while walking.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Collect the folders that receive groups, walking at most `max_depth` levels.
    ///
    /// With `depth` counted from `root` (root is 0):
    /// - a directory with `depth < max_depth` and no subdirectories is emitted;
    /// - at `depth == max_depth - 1` every immediate subdirectory is emitted
    ///   as-is and none of them is descended into;
    /// - nothing at or below `max_depth` is visited.
    ///
    /// `max_depth == 0` therefore emits nothing. Output is in pre-order with
    /// siblings sorted by name.
    pub fn enumerate_bounded(
        &self,
        root: &NormalizedPath,
        max_depth: usize,
    ) -> Result<Vec<NormalizedPath>> {
        if !root.is_dir() {
            return Err(Error::not_found(root.to_native()));
        }

        let mut folders = Vec::new();
        self.visit_bounded(root, 0, max_depth, &mut folders)?;

        tracing::debug!(
            root = %root,
            max_depth,
            count = folders.len(),
            "Enumerated bounded folders"
        );
        Ok(folders)
    }

    fn visit_bounded(
        &self,
        dir: &NormalizedPath,
        depth: usize,
        max_depth: usize,
        out: &mut Vec<NormalizedPath>,
    ) -> Result<()> {
        if depth >= max_depth {
            return Ok(());
        }

        let subdirs = self.child_dirs(dir)?;
        if subdirs.is_empty() {
            out.push(dir.clone());
            return Ok(());
        }

        if depth + 1 == max_depth {
            out.extend(subdirs.into_iter().map(|child| child.path));
            return Ok(());
        }

        // Unfollowed links still count as children but are not entered
        for child in subdirs.iter().filter(|c| self.follow_links || !c.linked) {
            self.visit_bounded(&child.path, depth + 1, max_depth, out)?;
        }
        Ok(())
    }

    /// Immediate subdirectories of `dir`, sorted by name.
    ///
    /// Symlinks to directories are included whether or not links are followed.
    pub fn subdirectories(&self, dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        Ok(self
            .child_dirs(dir)?
            .into_iter()
            .map(|child| child.path)
            .collect())
    }

    fn child_dirs(&self, dir: &NormalizedPath) -> Result<Vec<ChildDir>> {
        let native = dir.to_native();
        let mut subdirs = Vec::new();

        for entry in WalkDir::new(&native)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| walk_error(&native, e))?;
            let linked = entry.path_is_symlink();
            if entry.file_type().is_dir() || (linked && entry.path().is_dir()) {
                subdirs.push(ChildDir {
                    path: NormalizedPath::new(entry.path()),
                    linked,
                });
            }
        }

        Ok(subdirs)
    }

    /// Recursively list every file under `folder` whose suffix is in `extensions`.
    ///
    /// Suffixes include the dot (`.c`) and match case-sensitively.
    pub fn find_files<S: AsRef<str>>(
        &self,
        folder: &NormalizedPath,
        extensions: &[S],
    ) -> Result<Vec<FoundFile>> {
        if !folder.is_dir() {
            return Err(Error::not_found(folder.to_native()));
        }

        let native = folder.to_native();
        let mut files = Vec::new();

        for entry in WalkDir::new(&native)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| walk_error(&native, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = NormalizedPath::new(entry.path());
            let Some(suffix) = path.suffix() else {
                continue;
            };
            if !has_suffix(extensions, suffix) {
                continue;
            }

            let file_type = FileType::from_suffix(suffix);
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push(FoundFile {
                name,
                path,
                file_type,
            });
        }

        Ok(files)
    }

    /// Every directory under `root` (inclusive) that directly holds at least
    /// one file whose suffix is in `extensions`. Sorted, no duplicates.
    pub fn find_folders_containing<S: AsRef<str>>(
        &self,
        root: &NormalizedPath,
        extensions: &[S],
    ) -> Result<Vec<NormalizedPath>> {
        if !root.is_dir() {
            return Err(Error::not_found(root.to_native()));
        }

        let native = root.to_native();
        let mut folders = BTreeSet::new();

        for entry in WalkDir::new(&native).follow_links(self.follow_links) {
            let entry = entry.map_err(|e| walk_error(&native, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = NormalizedPath::new(entry.path());
            let matched = path.suffix().is_some_and(|s| has_suffix(extensions, s));
            if matched && let Some(parent) = path.parent() {
                folders.insert(parent);
            }
        }

        Ok(folders.into_iter().collect())
    }
}

fn has_suffix<S: AsRef<str>>(extensions: &[S], suffix: &str) -> bool {
    extensions.iter().any(|ext| ext.as_ref() == suffix)
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    Error::io(path, err.into())
}
