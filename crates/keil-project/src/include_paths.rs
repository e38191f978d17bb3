//! The `;`-joined include-path field as a sorted set

use std::collections::BTreeSet;

const SEPARATOR: char = ';';

/// Sorted, duplicate-free set of include paths.
///
/// Whatever the field held before, writing a list back always produces
/// sorted, deduplicated text, so any accumulated duplication heals on the
/// next mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePathList {
    paths: BTreeSet<String>,
}

impl IncludePathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw field text. Empty segments are dropped.
    pub fn parse(field: &str) -> Self {
        Self {
            paths: field
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Insert every path, returning how many were new.
    pub fn union<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .map(Into::into)
            .filter(|path: &String| !path.is_empty())
            .filter(|path| self.paths.insert(path.clone()))
            .count()
    }

    /// Remove every path matching `predicate`, returning the removed ones in order.
    pub fn remove_matching(&mut self, mut predicate: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .paths
            .iter()
            .filter(|path| predicate(path))
            .cloned()
            .collect();
        for path in &removed {
            self.paths.remove(path);
        }
        removed
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Render as field text.
    pub fn to_field(&self) -> String {
        self.iter().collect::<Vec<_>>().join(";")
    }
}

impl std::fmt::Display for IncludePathList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_field())
    }
}
