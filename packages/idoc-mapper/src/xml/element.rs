//! Owned in-memory XML element tree.

use indexmap::IndexMap;

/// An XML element: tag, ordered attributes, ordered children, optional text.
///
/// Empty text is stored as no text, so `<FIELD></FIELD>`, `<FIELD/>` and a
/// field built with an empty value are all the same element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Create an element with no attributes, children or text.
    ///
    /// The tag is not validated here; callers building output trees check
    /// names before constructing elements.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Look up a single attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Text content, or `""` when the element has none.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Whether the element carries any text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Replace the text content; an empty string clears it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
    }

    /// Set an attribute, keeping its original position if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Replace all attributes with a copy of `attributes`.
    pub fn copy_attributes_from(&mut self, other: &Element) {
        self.attributes.clone_from(&other.attributes);
    }

    /// Append a child and return a mutable reference to it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All descendants in document (pre-)order, excluding `self`.
    ///
    /// # Examples
    /// ```
    /// use idoc_mapper::xml::Element;
    ///
    /// let root = Element::new("A")
    ///     .with_child(Element::new("B").with_child(Element::new("C")))
    ///     .with_child(Element::new("D"));
    /// let tags: Vec<_> = root.descendants().map(Element::tag).collect();
    /// assert_eq!(tags, ["B", "C", "D"]);
    /// ```
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant with the given tag, in document order.
    #[must_use]
    pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
        self.descendants().find(|el| el.tag == tag)
    }
}

/// Pre-order iterator over the descendants of an element.
///
/// Uses an explicit stack so arbitrarily deep documents do not recurse.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("ROOT")
            .with_child(
                Element::new("IDOC")
                    .with_attribute("BEGIN", "1")
                    .with_child(Element::new("SEG").with_child(Element::new("F").with_text("a")))
                    .with_child(Element::new("SEG").with_child(Element::new("F").with_text("b"))),
            )
            .with_child(Element::new("TRAILER"))
    }

    #[test]
    fn test_empty_text_is_no_text() {
        let el = Element::new("F").with_text("");
        assert!(!el.has_text());
        assert_eq!(el.text(), "");
        assert_eq!(el, Element::new("F"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let el = Element::new("X")
            .with_attribute("z", "1")
            .with_attribute("a", "2")
            .with_attribute("m", "3");
        let names: Vec<_> = el.attributes().keys().map(String::as_str).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut el = Element::new("X")
            .with_attribute("a", "1")
            .with_attribute("b", "2");
        el.set_attribute("a", "9");
        let pairs: Vec<_> = el
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, [("a", "9"), ("b", "2")]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let tags: Vec<_> = root.descendants().map(Element::tag).collect();
        assert_eq!(tags, ["IDOC", "SEG", "F", "SEG", "F", "TRAILER"]);
    }

    #[test]
    fn test_descendants_excludes_self() {
        let leaf = Element::new("ONLY");
        assert_eq!(leaf.descendants().count(), 0);
    }

    #[test]
    fn test_find_descendant_first_match() {
        let root = sample();
        let seg = root.find_descendant("SEG").unwrap();
        assert_eq!(seg.find_child("F").unwrap().text(), "a");
        assert!(root.find_descendant("MISSING").is_none());
    }

    #[test]
    fn test_find_child_and_attribute() {
        let root = sample();
        let idoc = root.find_child("IDOC").unwrap();
        assert_eq!(idoc.find_child("SEG").unwrap().find_child("F").unwrap().text(), "a");
        assert_eq!(idoc.attribute("BEGIN"), Some("1"));
        assert_eq!(idoc.attribute("END"), None);
    }

    #[test]
    fn test_push_child_returns_child() {
        let mut root = Element::new("R");
        root.push_child(Element::new("C")).set_text("x");
        assert_eq!(root.children()[0].text(), "x");
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let mut el = Element::new("N");
        for _ in 0..10_000 {
            el = Element::new("N").with_child(el);
        }
        assert_eq!(el.descendants().count(), 10_000);
        // Unwind iteratively so dropping the tree does not recurse either.
        let mut current = Some(el);
        while let Some(mut node) = current {
            current = node.children.pop();
        }
    }
}
