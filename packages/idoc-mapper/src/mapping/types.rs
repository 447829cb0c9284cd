//! Types describing how an output document is built from an input document.

use indexmap::IndexMap;

use crate::xml::Element;

/// Instruction for producing one output field of a segment instance.
///
/// The variant is decided once, when the rule is built; the transform only
/// resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Output field always gets `value`.
    Hardcoded { output: String, value: String },

    /// Output field gets the text of the segment's direct child `input`.
    Mapped { output: String, input: String },

    /// Output field is present but always empty.
    Empty { output: String },
}

impl FieldRule {
    /// Rule that always yields `value`.
    #[must_use]
    pub fn hardcoded(output: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Hardcoded {
            output: output.into(),
            value: value.into(),
        }
    }

    /// Rule that copies the text of an input child.
    #[must_use]
    pub fn mapped(output: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Mapped {
            output: output.into(),
            input: input.into(),
        }
    }

    /// Rule that always yields an empty field.
    #[must_use]
    pub fn empty(output: impl Into<String>) -> Self {
        Self::Empty {
            output: output.into(),
        }
    }

    /// Decide the variant from a raw `(output, input, hardcoded)` triple.
    ///
    /// A non-empty hardcoded value wins over an input reference; with
    /// neither, the rule is `Empty`.
    ///
    /// # Examples
    /// ```
    /// use idoc_mapper::mapping::FieldRule;
    ///
    /// assert_eq!(FieldRule::from_parts("OUT", "IN", "X"), FieldRule::hardcoded("OUT", "X"));
    /// assert_eq!(FieldRule::from_parts("OUT", "IN", ""), FieldRule::mapped("OUT", "IN"));
    /// assert_eq!(FieldRule::from_parts("OUT", "", ""), FieldRule::empty("OUT"));
    /// ```
    #[must_use]
    pub fn from_parts(output: &str, input: &str, hardcoded: &str) -> Self {
        if !hardcoded.is_empty() {
            Self::hardcoded(output, hardcoded)
        } else if !input.is_empty() {
            Self::mapped(output, input)
        } else {
            Self::empty(output)
        }
    }

    /// Name of the output field this rule produces.
    #[must_use]
    pub fn output(&self) -> &str {
        match self {
            Self::Hardcoded { output, .. } | Self::Mapped { output, .. } | Self::Empty { output } => {
                output
            }
        }
    }

    /// Value of the output field for one segment instance.
    ///
    /// A mapped field that the instance does not have resolves to `""`.
    #[must_use]
    pub fn resolve<'a>(&'a self, segment: &'a Element) -> &'a str {
        match self {
            Self::Hardcoded { value, .. } => value,
            Self::Mapped { input, .. } => segment.find_child(input).map_or("", Element::text),
            Self::Empty { .. } => "",
        }
    }
}

/// Ordered mapping from segment name to the field rules of that segment.
///
/// Segment order is output segment order; rule order is output field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    segments: IndexMap<String, Vec<FieldRule>>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a segment, returning its rule list.
    ///
    /// A segment registered twice keeps its first position.
    pub fn insert_segment(&mut self, segment: impl Into<String>) -> &mut Vec<FieldRule> {
        self.segments.entry(segment.into()).or_default()
    }

    /// Append a rule to a segment, registering the segment if needed.
    pub fn push_rule(&mut self, segment: impl Into<String>, rule: FieldRule) {
        self.insert_segment(segment).push(rule);
    }

    /// Builder form of [`Mapping::push_rule`].
    #[must_use]
    pub fn with_rule(mut self, segment: impl Into<String>, rule: FieldRule) -> Self {
        self.push_rule(segment, rule);
        self
    }

    /// Rules for a segment, if it is mapped.
    #[must_use]
    pub fn rules(&self, segment: &str) -> Option<&[FieldRule]> {
        self.segments.get(segment).map(Vec::as_slice)
    }

    /// Segments and their rules in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldRule])> {
        self.segments
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Number of mapped segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segment is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One raw row chosen by a user: `(segment, output, input-or-empty, hardcoded-or-empty)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Input segment (tag) the row belongs to.
    pub segment: String,
    /// Output field name.
    pub output_field: String,
    /// Input child tag to copy, or empty.
    pub input_field: String,
    /// Literal value, or empty.
    pub hardcoded_value: String,
}

impl Selection {
    /// Create a selection row.
    #[must_use]
    pub fn new(
        segment: impl Into<String>,
        output_field: impl Into<String>,
        input_field: impl Into<String>,
        hardcoded_value: impl Into<String>,
    ) -> Self {
        Self {
            segment: segment.into(),
            output_field: output_field.into(),
            input_field: input_field.into(),
            hardcoded_value: hardcoded_value.into(),
        }
    }

    /// The rule this row describes.
    #[must_use]
    pub fn to_rule(&self) -> FieldRule {
        FieldRule::from_parts(&self.output_field, &self.input_field, &self.hardcoded_value)
    }
}
