//! The loaded project descriptor

use keil_fs::{NormalizedPath, io};
use xmltree::{Element, XMLNode};

use crate::error::{Error, Result};
use crate::group::{Group, GroupMut, group_name};
use crate::include_paths::IncludePathList;
use crate::markup::{self, Declaration};
use crate::tree::{
    FILES, GROUP, GROUP_NAME, GROUPS, INCLUDE_PATH, TARGET_ARM_ADS, VARIOUS_CONTROLS, as_element,
    as_element_mut, child_text, children_named, ensure_child, find_first, find_first_mut,
    set_text, text_element, text_of,
};

/// In-memory tree of a `.uvprojx` descriptor.
///
/// Groups live under the first `<Groups>` element in document order and are
/// keyed by the literal text of their `<GroupName>`. Names may contain `/`
/// for readability, but the namespace is flat: `A` and `A/B` are unrelated
/// keys as far as lookup is concerned.
///
/// All mutation is in memory; nothing touches disk until [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct DescriptorDocument {
    path: NormalizedPath,
    root: Element,
    declaration: Declaration,
}

impl DescriptorDocument {
    /// Read and parse the descriptor at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let source = io::read_bytes(path)?;
        Self::parse(path.clone(), &source)
    }

    /// Parse descriptor source. `path` is where the document lives and is
    /// the anchor for relative file and include paths.
    pub fn parse(path: NormalizedPath, source: &[u8]) -> Result<Self> {
        let (root, declaration) = markup::read_document(source).map_err(|message| Error::Parse {
            path: path.to_native(),
            message,
        })?;
        tracing::debug!(path = %path, root = %root.name, "Parsed descriptor");
        Ok(Self {
            path,
            root,
            declaration,
        })
    }

    /// Where this descriptor is read from and written to.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    /// Group names in document order.
    pub fn group_names(&self) -> Vec<String> {
        self.group_elements().filter_map(group_name).collect()
    }

    /// Snapshot of every group in document order.
    pub fn all_groups(&self) -> Vec<Group> {
        self.group_elements().map(Group::from_element).collect()
    }

    /// Snapshot of the group named exactly `name`.
    pub fn find_group(&self, name: &str) -> Option<Group> {
        self.group_elements()
            .find(|group| is_named(group, name))
            .map(Group::from_element)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group_elements().any(|group| is_named(group, name))
    }

    /// Return the group named `name`, appending a new empty one if absent.
    ///
    /// An existing group keeps its files. Calling this repeatedly with the
    /// same name never creates a second group.
    pub fn get_or_create_group(&mut self, name: &str) -> Result<GroupMut<'_>> {
        let groups =
            find_first_mut(&mut self.root, GROUPS).ok_or(Error::MissingNode { node: GROUPS })?;

        let position = groups
            .children
            .iter()
            .position(|node| as_element(node).is_some_and(|el| el.name == GROUP && is_named(el, name)));

        let index = match position {
            Some(index) => index,
            None => {
                tracing::debug!(group = name, "Creating group");
                groups.children.push(XMLNode::Element(new_group(name)));
                groups.children.len() - 1
            }
        };

        let element = as_element_mut(&mut groups.children[index])
            .ok_or(Error::MissingNode { node: GROUP })?;
        ensure_child(element, FILES);
        Ok(GroupMut::new(element, &self.path))
    }

    /// Handle to an existing group, if there is one.
    pub fn group_mut(&mut self, name: &str) -> Option<GroupMut<'_>> {
        let groups = find_first_mut(&mut self.root, GROUPS)?;
        let element = groups
            .children
            .iter_mut()
            .filter_map(as_element_mut)
            .find(|el| el.name == GROUP && is_named(el, name))?;
        Some(GroupMut::new(element, &self.path))
    }

    /// Remove every group whose name satisfies `predicate`.
    ///
    /// Returns the removed names in removal (document) order; matching
    /// nothing yields an empty list.
    pub fn remove_groups_matching(&mut self, mut predicate: impl FnMut(&str) -> bool) -> Vec<String> {
        let Some(groups) = find_first_mut(&mut self.root, GROUPS) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        groups.children.retain(|node| {
            let Some(el) = as_element(node).filter(|el| el.name == GROUP) else {
                return true;
            };
            match group_name(el) {
                Some(name) if predicate(&name) => {
                    removed.push(name);
                    false
                }
                _ => true,
            }
        });

        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "Removed groups");
        }
        removed
    }

    /// Remove the group named `prefix` and every group under it.
    ///
    /// Matches `prefix` itself and names starting with `prefix/`; `AB` and
    /// `A2` are not under `A`.
    pub fn remove_groups_by_prefix(&mut self, prefix: &str) -> Vec<String> {
        let nested = format!("{prefix}/");
        self.remove_groups_matching(|name| name == prefix || name.starts_with(&nested))
    }

    /// Current include paths. An absent node or empty text reads as empty.
    pub fn include_paths(&self) -> IncludePathList {
        find_first(&self.root, TARGET_ARM_ADS)
            .and_then(|ads| find_first(ads, VARIOUS_CONTROLS))
            .and_then(|controls| child_text(controls, INCLUDE_PATH))
            .map(|text| IncludePathList::parse(&text))
            .unwrap_or_default()
    }

    /// Union `paths` into the include-path field and rewrite it sorted.
    ///
    /// Returns how many paths were new.
    pub fn add_include_paths<I, S>(&mut self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = self.include_paths();
        let added = list.union(paths);
        self.write_include_paths(&list)?;
        Ok(added)
    }

    /// Drop include paths matching `predicate` and rewrite the rest sorted.
    ///
    /// Returns the removed paths.
    pub fn remove_include_paths_matching(
        &mut self,
        predicate: impl FnMut(&str) -> bool,
    ) -> Result<Vec<String>> {
        let mut list = self.include_paths();
        let removed = list.remove_matching(predicate);
        self.write_include_paths(&list)?;
        Ok(removed)
    }

    fn write_include_paths(&mut self, list: &IncludePathList) -> Result<()> {
        let ads = find_first_mut(&mut self.root, TARGET_ARM_ADS).ok_or(Error::MissingNode {
            node: TARGET_ARM_ADS,
        })?;
        let controls = find_first_mut(ads, VARIOUS_CONTROLS).ok_or(Error::MissingNode {
            node: VARIOUS_CONTROLS,
        })?;
        let field = ensure_child(controls, INCLUDE_PATH);
        set_text(field, &list.to_field());
        Ok(())
    }

    fn group_elements(&self) -> impl Iterator<Item = &Element> {
        find_first(&self.root, GROUPS)
            .into_iter()
            .flat_map(|groups| children_named(groups, GROUP))
    }
}

fn is_named(group: &Element, name: &str) -> bool {
    group.get_child(GROUP_NAME).is_some_and(|el| text_of(el) == name)
}

fn new_group(name: &str) -> Element {
    let mut group = Element::new(GROUP);
    group
        .children
        .push(XMLNode::Element(text_element(GROUP_NAME, name)));
    group.children.push(XMLNode::Element(Element::new(FILES)));
    group
}
