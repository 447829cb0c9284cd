//! Parsing XML text into an owned [`Element`] tree.
//!
//! roxmltree does the tokenizing and well-formedness checks; this module
//! copies the borrowed DOM into owned elements so the input buffer can be
//! dropped before transforming.

use std::fs;
use std::path::Path;

use roxmltree::{Children, Document, Node, ParsingOptions};

use super::element::Element;
use crate::error::{MapperError, Result};

/// Parse an XML document from text.
///
/// Element and attribute names are taken without namespace prefix.
/// Comments and processing instructions are dropped. Whitespace-only text
/// between child elements is dropped; text of leaf elements is kept as is.
///
/// # Errors
/// * `MapperError::EmptyDocument` if the input is empty or whitespace only
/// * `MapperError::XmlParse` if the markup is not well-formed
///
/// # Examples
/// ```
/// use idoc_mapper::xml::parse;
///
/// let root = parse(r#"<ROOT><IDOC BEGIN="1"><SEG><F>A</F></SEG></IDOC></ROOT>"#).unwrap();
/// assert_eq!(root.tag(), "ROOT");
/// assert_eq!(root.find_descendant("F").unwrap().text(), "A");
/// assert!(parse("<ROOT>").is_err());
/// ```
pub fn parse(text: &str) -> Result<Element> {
    if text.trim().is_empty() {
        return Err(MapperError::EmptyDocument);
    }

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options)?;
    Ok(build_tree(doc.root_element()))
}

/// Parse an XML document from raw bytes, which must be UTF-8.
///
/// A leading byte order mark is ignored.
pub fn parse_bytes(bytes: &[u8]) -> Result<Element> {
    let text = std::str::from_utf8(bytes)?;
    parse(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Read and parse an XML file.
///
/// # Errors
/// An unreadable file is reported as `MapperError::ReadInput`, which is a
/// parse-kind error like malformed content.
pub fn read_xml(path: &Path) -> Result<Element> {
    let bytes = fs::read(path).map_err(|source| MapperError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes)
}

/// Element under construction together with its remaining source children.
struct Frame<'a, 'input> {
    children: Children<'a, 'input>,
    element: Element,
    text: String,
}

impl<'a, 'input> Frame<'a, 'input> {
    fn new(node: Node<'a, 'input>) -> Self {
        let mut element = Element::new(node.tag_name().name());
        for attr in node.attributes() {
            element.set_attribute(attr.name(), attr.value());
        }
        Self {
            children: node.children(),
            element,
            text: String::new(),
        }
    }

    fn finish(self) -> Element {
        let Self {
            mut element, text, ..
        } = self;
        // Text before the first child only counts when it is not indentation
        if element.children().is_empty() || !text.trim().is_empty() {
            element.set_text(text);
        }
        element
    }
}

/// Copy a roxmltree element and its subtree into owned elements.
///
/// Walks with an explicit stack of frames instead of recursing.
fn build_tree(root: Node<'_, '_>) -> Element {
    let mut stack = vec![Frame::new(root)];

    loop {
        let Some(frame) = stack.last_mut() else {
            // The root frame is only popped on the return path below
            return Element::new(root.tag_name().name());
        };

        match frame.children.next() {
            Some(child) if child.is_element() => stack.push(Frame::new(child)),
            Some(child) if child.is_text() => {
                if frame.element.children().is_empty() {
                    frame.text.push_str(child.text().unwrap_or_default());
                }
            }
            Some(_) => {}
            None => {
                let Some(done) = stack.pop().map(Frame::finish) else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => {
                        parent.element.push_child(done);
                    }
                    None => return done,
                }
            }
        }
    }
}
