//! XML serialization for element trees.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::element::Element;
use crate::config::{INDENT, XML_DECLARATION};
use crate::error::{MapperError, Result};

/// Render a tree as an indented XML document.
///
/// Output starts with the XML declaration, indents four spaces per level and
/// ends with a newline. Elements with children ignore their own text.
///
/// # Examples
/// ```
/// use idoc_mapper::xml::{to_xml_string, Element};
///
/// let root = Element::new("ROOT").with_child(
///     Element::new("IDOC")
///         .with_attribute("BEGIN", "1")
///         .with_child(Element::new("F").with_text("A"))
///         .with_child(Element::new("G")),
/// );
/// assert_eq!(
///     to_xml_string(&root),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <ROOT>\n    <IDOC BEGIN=\"1\">\n        <F>A</F>\n        <G/>\n    </IDOC>\n</ROOT>\n"
/// );
/// ```
#[must_use]
pub fn to_xml_string(root: &Element) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }

    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }

    if !element.children().is_empty() {
        out.push_str(">\n");
        for child in element.children() {
            write_element(out, child, depth + 1);
        }
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str("</");
        out.push_str(element.tag());
        out.push_str(">\n");
    } else if element.has_text() {
        out.push('>');
        escape_into(out, element.text(), false);
        out.push_str("</");
        out.push_str(element.tag());
        out.push_str(">\n");
    } else {
        out.push_str("/>\n");
    }
}

/// Escape markup characters.
///
/// Attribute values also escape quotes and the whitespace characters a
/// parser would otherwise normalize to spaces.
fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}

/// Save a tree as an XML file.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// A failed write never leaves a partial document at `path`.
///
/// # Errors
/// `MapperError::Write` if any step of writing fails.
pub fn save_xml(root: &Element, path: &Path) -> Result<()> {
    let content = to_xml_string(root);
    let temp_file = temp_path(path);

    let written = write_and_rename(&content, &temp_file, path);
    if written.is_err() {
        // Best effort; the temp file may not exist yet
        let _ = fs::remove_file(&temp_file);
    }
    written.map_err(|source| MapperError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_and_rename(content: &str, temp_file: &Path, output_file: &Path) -> std::io::Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(output_file)?;
    }

    fs::rename(temp_file, output_file)
}

/// Hidden sibling of `path` used as the temp file.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.xml".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
