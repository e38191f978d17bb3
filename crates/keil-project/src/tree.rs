//! Element-tree helpers over `xmltree`

use xmltree::{Element, XMLNode};

pub(crate) const GROUPS: &str = "Groups";
pub(crate) const GROUP: &str = "Group";
pub(crate) const GROUP_NAME: &str = "GroupName";
pub(crate) const FILES: &str = "Files";
pub(crate) const FILE: &str = "File";
pub(crate) const FILE_NAME: &str = "FileName";
pub(crate) const FILE_TYPE: &str = "FileType";
pub(crate) const FILE_PATH: &str = "FilePath";
pub(crate) const TARGET_ARM_ADS: &str = "TargetArmAds";
pub(crate) const VARIOUS_CONTROLS: &str = "VariousControls";
pub(crate) const INCLUDE_PATH: &str = "IncludePath";

pub(crate) fn as_element(node: &XMLNode) -> Option<&Element> {
    match node {
        XMLNode::Element(element) => Some(element),
        _ => None,
    }
}

pub(crate) fn as_element_mut(node: &mut XMLNode) -> Option<&mut Element> {
    match node {
        XMLNode::Element(element) => Some(element),
        _ => None,
    }
}

/// First element named `name` in document order, `el` itself included.
pub(crate) fn find_first<'a>(el: &'a Element, name: &str) -> Option<&'a Element> {
    if el.name == name {
        return Some(el);
    }
    el.children
        .iter()
        .filter_map(as_element)
        .find_map(|child| find_first(child, name))
}

pub(crate) fn find_first_mut<'a>(el: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    if el.name == name {
        return Some(el);
    }
    for child in el.children.iter_mut().filter_map(as_element_mut) {
        if let Some(found) = find_first_mut(child, name) {
            return Some(found);
        }
    }
    None
}

/// Direct child elements named `name`.
pub(crate) fn children_named<'a>(
    el: &'a Element,
    name: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    el.children
        .iter()
        .filter_map(as_element)
        .filter(move |child| child.name == name)
}

pub(crate) fn child_mut<'a>(el: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    el.children
        .iter_mut()
        .filter_map(as_element_mut)
        .find(|child| child.name == name)
}

/// Direct child named `name`, appended empty if absent.
pub(crate) fn ensure_child<'a>(el: &'a mut Element, name: &str) -> &'a mut Element {
    let idx = match el
        .children
        .iter()
        .position(|node| as_element(node).is_some_and(|child| child.name == name))
    {
        Some(idx) => idx,
        None => {
            el.children.push(XMLNode::Element(Element::new(name)));
            el.children.len() - 1
        }
    };
    match &mut el.children[idx] {
        XMLNode::Element(child) => child,
        // `idx` was chosen to point at an element above
        _ => unreachable!("position() matched a non-element node"),
    }
}

/// Concatenated text content, empty when there is none.
pub(crate) fn text_of(el: &Element) -> String {
    el.get_text().map(|t| t.into_owned()).unwrap_or_default()
}

/// Text of the direct child `name`, if that child exists.
pub(crate) fn child_text(el: &Element, name: &str) -> Option<String> {
    el.get_child(name).map(text_of)
}

/// Replace all text content of `el`. An empty string leaves no text node.
pub(crate) fn set_text(el: &mut Element, text: &str) {
    el.children
        .retain(|node| !matches!(node, XMLNode::Text(_) | XMLNode::CData(_)));
    if !text.is_empty() {
        el.children.push(XMLNode::Text(text.to_string()));
    }
}

/// `<name>text</name>`
pub(crate) fn text_element(name: &str, text: &str) -> Element {
    let mut el = Element::new(name);
    set_text(&mut el, text);
    el
}
