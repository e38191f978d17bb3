//! Descriptor markup in and out
//!
//! The element tree is built from `xml-rs` events rather than
//! `Element::parse` so that prefixed attributes such as
//! `xsi:noNamespaceSchemaLocation` keep their prefix in the attribute key,
//! and the declaration's `standalone` flag is remembered for the next save.

use std::fmt;
use std::io::Read;

use xml::reader::XmlEvent;
use xmltree::{Element, EmitterConfig, ParserConfig, XMLNode};

/// The `<?xml ...?>` line a descriptor was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Declaration {
    version: String,
    standalone: Option<bool>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".into(),
            standalone: None,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<?xml version=\"{}\" encoding=\"UTF-8\"", self.version)?;
        if let Some(standalone) = self.standalone {
            let value = if standalone { "yes" } else { "no" };
            write!(f, " standalone=\"{value}\"")?;
        }
        write!(f, " ?>")
    }
}

/// Parse `source` into its root element and declaration.
pub(crate) fn read_document<R: Read>(source: R) -> Result<(Element, Declaration), String> {
    let mut reader = ParserConfig::new()
        .ignore_comments(false)
        .create_reader(source);
    let mut declaration = Declaration::default();
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.next().map_err(|e| e.to_string())? {
            XmlEvent::StartDocument {
                version,
                standalone,
                ..
            } => {
                declaration = Declaration {
                    version: version.to_string(),
                    standalone,
                };
            }
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let mut element = Element::new(&name.local_name);
                element.prefix = name.prefix;
                element.namespace = name.namespace;
                element.namespaces = (!namespace.is_essentially_empty()).then_some(namespace);
                for attribute in attributes {
                    let key = match attribute.name.prefix {
                        Some(prefix) => format!("{prefix}:{}", attribute.name.local_name),
                        None => attribute.name.local_name,
                    };
                    element.attributes.insert(key, attribute.value);
                }
                open.push(element);
            }
            XmlEvent::EndElement { .. } => {
                let Some(element) = open.pop() else {
                    return Err("unbalanced end tag".into());
                };
                match open.last_mut() {
                    Some(parent) => parent.children.push(XMLNode::Element(element)),
                    None => return Ok((element, declaration)),
                }
            }
            XmlEvent::Characters(text) => push_child(&mut open, XMLNode::Text(text)),
            XmlEvent::CData(text) => push_child(&mut open, XMLNode::CData(text)),
            XmlEvent::Comment(text) => push_child(&mut open, XMLNode::Comment(text)),
            XmlEvent::ProcessingInstruction { name, data } => {
                push_child(&mut open, XMLNode::ProcessingInstruction(name, data))
            }
            XmlEvent::Whitespace(_) => {}
            XmlEvent::EndDocument => return Err("no root element".into()),
        }
    }
}

/// Nodes outside the root element are dropped.
fn push_child(open: &mut [Element], node: XMLNode) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    }
}

/// Serialize `root` under `declaration` with two-space indentation.
pub(crate) fn write_document(
    root: &Element,
    declaration: &Declaration,
) -> Result<Vec<u8>, xmltree::Error> {
    let config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string("  ")
        .write_document_declaration(false);

    let mut buffer = format!("{declaration}\n").into_bytes();
    root.write_with_config(&mut buffer, config)?;
    buffer.push(b'\n');
    Ok(buffer)
}
