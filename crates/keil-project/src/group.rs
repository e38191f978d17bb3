//! Group and file views over descriptor elements

use keil_fs::{FoundFile, NormalizedPath, relative_to_file};
use xmltree::{Element, XMLNode};

use crate::tree::{
    FILE, FILE_NAME, FILE_PATH, FILE_TYPE, FILES, GROUP_NAME, as_element, child_mut, child_text,
    children_named, ensure_child, text_element, text_of,
};

/// A file listed under a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub file_name: String,
    /// Path relative to the descriptor's directory
    pub file_path: String,
    /// Numeric `FileType` code, `0` if the field is missing or not a number
    pub file_type: u8,
}

/// Snapshot of a group: its name and files in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub files: Vec<FileEntry>,
}

impl Group {
    pub(crate) fn from_element(element: &Element) -> Self {
        Self {
            name: group_name(element).unwrap_or_default(),
            files: file_entries(element),
        }
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.file_name.as_str()).collect()
    }
}

/// Mutable handle to one `<Group>` element.
///
/// Holds the descriptor path so new entries get their `FilePath` relative
/// to the descriptor.
pub struct GroupMut<'a> {
    element: &'a mut Element,
    anchor: &'a NormalizedPath,
}

impl<'a> GroupMut<'a> {
    pub(crate) fn new(element: &'a mut Element, anchor: &'a NormalizedPath) -> Self {
        Self { element, anchor }
    }

    pub fn name(&self) -> String {
        group_name(self.element).unwrap_or_default()
    }

    pub fn files(&self) -> Vec<FileEntry> {
        file_entries(self.element)
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.element
            .get_child(FILES)
            .is_some_and(|files| {
                children_named(files, FILE)
                    .any(|file| child_text(file, FILE_NAME).as_deref() == Some(file_name))
            })
    }

    /// Append `file` unless an entry with the same file name is already present.
    ///
    /// Returns whether an entry was added. A repeated name is a silent no-op,
    /// which is what makes re-running a scan idempotent.
    pub fn add_file(&mut self, file: &FoundFile) -> bool {
        if self.contains_file(&file.name) {
            tracing::trace!(file = %file.name, "File already in group");
            return false;
        }

        let mut entry = Element::new(FILE);
        entry
            .children
            .push(XMLNode::Element(text_element(FILE_NAME, &file.name)));
        entry.children.push(XMLNode::Element(text_element(
            FILE_TYPE,
            &file.file_type.code().to_string(),
        )));
        entry.children.push(XMLNode::Element(text_element(
            FILE_PATH,
            &relative_to_file(&file.path, self.anchor),
        )));

        ensure_child(self.element, FILES)
            .children
            .push(XMLNode::Element(entry));
        true
    }

    /// Remove every file entry, returning how many there were.
    pub fn clear_files(&mut self) -> usize {
        let Some(files) = child_mut(self.element, FILES) else {
            return 0;
        };
        let before = files.children.len();
        files
            .children
            .retain(|node| as_element(node).is_none_or(|el| el.name != FILE));
        before - files.children.len()
    }
}

pub(crate) fn group_name(element: &Element) -> Option<String> {
    element.get_child(GROUP_NAME).map(text_of)
}

fn file_entries(element: &Element) -> Vec<FileEntry> {
    let Some(files) = element.get_child(FILES) else {
        return Vec::new();
    };
    children_named(files, FILE)
        .map(|file| FileEntry {
            file_name: child_text(file, FILE_NAME).unwrap_or_default(),
            file_path: child_text(file, FILE_PATH).unwrap_or_default(),
            file_type: child_text(file, FILE_TYPE)
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(0),
        })
        .collect()
}
