//! Transform engine: apply a [`Mapping`] to an input tree.

use std::collections::HashMap;

use crate::config::{is_xml_char, DEFAULT_CONTAINER_TAG};
use crate::error::{MapperError, Result};
use crate::mapping::{FieldRule, Mapping};
use crate::xml::Element;

/// Settings for a transform run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    container_tag: String,
}

impl TransformConfig {
    /// Config with a custom container tag.
    #[must_use]
    pub fn new(container_tag: impl Into<String>) -> Self {
        Self {
            container_tag: container_tag.into(),
        }
    }

    /// Tag of the record wrapper that output segments are placed under.
    #[must_use]
    pub fn container_tag(&self) -> &str {
        &self.container_tag
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_TAG)
    }
}

/// Transform an input tree with the default `IDOC` container tag.
///
/// See [`transform_with`].
///
/// # Examples
/// ```
/// use idoc_mapper::mapping::{FieldRule, Mapping};
/// use idoc_mapper::transform::transform;
/// use idoc_mapper::xml::parse;
///
/// let input = parse(r#"<ENVELOPE><IDOC BEGIN="1"><E1SEG><E1FIELD>A</E1FIELD></E1SEG></IDOC></ENVELOPE>"#).unwrap();
/// let mapping = Mapping::new().with_rule("E1SEG", FieldRule::mapped("OUT1", "E1FIELD"));
///
/// let output = transform(&input, &mapping).unwrap();
/// let idoc = output.find_child("IDOC").unwrap();
/// assert_eq!(idoc.attribute("BEGIN"), Some("1"));
/// assert_eq!(idoc.find_descendant("OUT1").unwrap().text(), "A");
/// ```
pub fn transform(input: &Element, mapping: &Mapping) -> Result<Element> {
    transform_with(input, mapping, &TransformConfig::default())
}

/// Transform an input tree into a new output tree.
///
/// The output root has the input root's tag and a single container child
/// carrying the attributes of the first container element found in the
/// input (none if there is none). For each mapped segment, in mapping
/// order, every input element with that tag becomes one output segment
/// (attributes copied) holding one child per rule.
///
/// Missing segments produce no output and missing fields produce empty
/// text; neither is an error.
///
/// # Errors
/// `MapperError::Transform` if the mapping holds an empty segment or output
/// field name, which would produce an element without a tag, or a
/// hardcoded value that could not be serialized as XML text.
pub fn transform_with(
    input: &Element,
    mapping: &Mapping,
    config: &TransformConfig,
) -> Result<Element> {
    check_invariants(mapping, config)?;

    let index = TagIndex::build(input);
    let container_tag = config.container_tag();

    let mut container = Element::new(container_tag);
    match index.first(container_tag) {
        Some(found) => container.copy_attributes_from(found),
        None => {
            tracing::warn!(container = container_tag, "Container element not found in input");
        }
    }

    for (segment, rules) in mapping.iter() {
        let instances = index.all(segment);
        tracing::debug!(segment, instances = instances.len(), "Mapping segment");

        for segment_in in instances {
            let mut segment_out = Element::new(segment);
            segment_out.copy_attributes_from(segment_in);

            for rule in rules {
                let value = rule.resolve(segment_in);
                segment_out.push_child(Element::new(rule.output()).with_text(value));
            }
            container.push_child(segment_out);
        }
    }

    Ok(Element::new(input.tag()).with_child(container))
}

fn check_invariants(mapping: &Mapping, config: &TransformConfig) -> Result<()> {
    if config.container_tag().is_empty() {
        return Err(MapperError::Transform(
            "container tag must not be empty".to_string(),
        ));
    }
    for (segment, rules) in mapping.iter() {
        if segment.is_empty() {
            return Err(MapperError::Transform(
                "segment name must not be empty".to_string(),
            ));
        }
        for rule in rules {
            if rule.output().is_empty() {
                return Err(MapperError::Transform(format!(
                    "output field name must not be empty (segment {segment})"
                )));
            }
            if let FieldRule::Hardcoded { output, value } = rule {
                if !value.chars().all(is_xml_char) {
                    return Err(MapperError::Transform(format!(
                        "value of {segment}/{output} holds a character not allowed in XML"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Descendants of the input root grouped by tag, each group in document order.
struct TagIndex<'a> {
    by_tag: HashMap<&'a str, Vec<&'a Element>>,
}

impl<'a> TagIndex<'a> {
    fn build(root: &'a Element) -> Self {
        let mut by_tag: HashMap<&'a str, Vec<&'a Element>> = HashMap::new();
        for element in root.descendants() {
            by_tag.entry(element.tag()).or_default().push(element);
        }
        Self { by_tag }
    }

    fn first(&self, tag: &str) -> Option<&'a Element> {
        self.by_tag.get(tag).and_then(|all| all.first().copied())
    }

    fn all(&self, tag: &str) -> &[&'a Element] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or_default()
    }
}
