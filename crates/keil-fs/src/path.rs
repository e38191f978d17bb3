//! Normalized path handling and relative-path computation

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Construction lexically cleans the path: backslashes become forward
/// slashes, repeated separators collapse, `.` segments disappear and `..`
/// segments pop their parent where one exists. A leading `//` is kept so
/// UNC paths survive normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Make `path` absolute against the current directory, then normalize.
    ///
    /// Does not touch the filesystem beyond reading the current directory,
    /// so symlinks are not resolved.
    pub fn absolute(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(absolute))
    }

    /// Resolve symlinks when the path exists; otherwise return it unchanged.
    pub fn canonical(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(resolved) => Self::new(resolved),
            Err(_) => self.clone(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.suffix().map(|suffix| &suffix[1..])
    }

    /// Get the final suffix including its dot (`main.c` gives `.c`).
    ///
    /// Dot-files such as `.gitignore` and names ending in a dot have none.
    pub fn suffix(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 || idx + 1 == name.len() {
                None
            } else {
                Some(&name[idx..])
            }
        })
    }

    /// Number of `/` separators, used to order folders shallowest first.
    pub fn depth(&self) -> usize {
        self.inner.matches('/').count()
    }

    /// The part of this path below `base`, if `base` is a whole-segment prefix.
    ///
    /// Returns `Some("")` when both paths are equal. `/src/app` is below
    /// `/src` but not below `/sr`.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<&str> {
        let rest = self.inner.strip_prefix(base.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else if base.inner.ends_with('/') {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Relative path from the directory `base` to this path.
    ///
    /// Both paths are expected to be absolute. No shared filesystem root is
    /// assumed: when the two share no leading segment at all (different
    /// drives, or one is a UNC path) this path is returned unchanged.
    /// Identical paths give `"."`.
    pub fn relative_to(&self, base: &NormalizedPath) -> String {
        let target = self.segments();
        let base = base.segments();

        let common = target
            .iter()
            .zip(base.iter())
            .take_while(|(a, b)| a == b)
            .count();

        if common == 0 {
            return self.inner.clone();
        }

        let mut parts: Vec<&str> = Vec::with_capacity(base.len() - common + target.len());
        parts.extend(std::iter::repeat_n("..", base.len() - common));
        parts.extend(&target[common..]);

        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Check if this appears to be a network path.
    pub fn is_network_path(&self) -> bool {
        self.inner.starts_with("//")
    }

    fn segments(&self) -> Vec<&str> {
        if self.inner == "/" {
            vec![""]
        } else {
            self.inner.split('/').collect()
        }
    }
}

/// Path of `target` relative to the directory holding `anchor_file`.
///
/// Both sides are canonicalized first when they exist, so a symlinked
/// checkout and its real location produce the same answer.
pub fn relative_to_file(target: &NormalizedPath, anchor_file: &NormalizedPath) -> String {
    let target = target.canonical();
    let anchor = anchor_file.canonical();
    match anchor.parent() {
        Some(base) => target.relative_to(&base),
        None => target.as_str().to_string(),
    }
}

fn clean(raw: &str) -> String {
    let unified = raw.replace('\\', "/");

    let (prefix, rest) = if unified.starts_with("//") && !unified.starts_with("///") {
        ("//", &unified[2..])
    } else if unified.starts_with('/') {
        ("/", unified.trim_start_matches('/'))
    } else {
        ("", unified.as_str())
    };

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." && !(parts.len() == 1 && last.ends_with(':')) => {
                    parts.pop();
                }
                Some(last) if last.ends_with(':') => {}
                _ if prefix.is_empty() => parts.push(".."),
                // `..` above the root stays at the root
                _ => {}
            },
            _ => parts.push(segment),
        }
    }

    let body = parts.join("/");
    match (prefix.is_empty(), body.is_empty()) {
        (true, true) => ".".to_string(),
        (false, true) => prefix.to_string(),
        _ => format!("{prefix}{body}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
