//! Segment and field discovery.
//!
//! Walks an input document once and lists every distinct tag with the tags
//! of its direct children. The result feeds whatever builds the mapping
//! (the `discover` command, a UI); it has no effect on transforming.

use indexmap::{IndexMap, IndexSet};

use crate::xml::Element;

/// Discovered segments: tag name to candidate input field names.
///
/// Both levels keep document order.
pub type SegmentCatalog = IndexMap<String, IndexSet<String>>;

/// Enumerate segments and their candidate fields.
///
/// Every descendant of `root` is visited in document order. The first
/// element with a given tag registers it along with its direct child tags;
/// later elements with the same tag add nothing.
///
/// # Examples
/// ```
/// use idoc_mapper::discovery::discover_segments;
/// use idoc_mapper::xml::parse;
///
/// let root = parse("<R><IDOC><SEG><A/><B/></SEG><SEG><C/></SEG></IDOC></R>").unwrap();
/// let catalog = discover_segments(&root);
///
/// let segments: Vec<_> = catalog.keys().map(String::as_str).collect();
/// assert_eq!(segments, ["IDOC", "SEG", "A", "B", "C"]);
/// let fields: Vec<_> = catalog["SEG"].iter().map(String::as_str).collect();
/// assert_eq!(fields, ["A", "B"]);
/// ```
#[must_use]
pub fn discover_segments(root: &Element) -> SegmentCatalog {
    let mut catalog = SegmentCatalog::new();

    for element in root.descendants() {
        if catalog.contains_key(element.tag()) {
            continue;
        }
        let fields = element
            .children()
            .iter()
            .map(|child| child.tag().to_string())
            .collect();
        catalog.insert(element.tag().to_string(), fields);
    }

    tracing::debug!(segments = catalog.len(), "Discovered segments");
    catalog
}
