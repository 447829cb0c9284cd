//! Building a [`Mapping`] from user selections.

use super::types::{FieldRule, Mapping, Selection};
use crate::config::{validate_tag_name, validate_value};
use crate::error::Result;

/// Build a mapping from selection rows.
///
/// Rows are grouped by segment in order of first appearance; within a
/// segment, rules keep row order.
///
/// # Errors
/// * `MapperError::InvalidName` if a segment or output field name cannot be
///   used as an XML tag
/// * `MapperError::InvalidValue` if a hardcoded value holds a character
///   XML cannot represent
///
/// # Examples
/// ```
/// use idoc_mapper::mapping::{build_mapping, FieldRule, Selection};
///
/// let mapping = build_mapping([
///     Selection::new("E1SEG", "OUT1", "E1FIELD", ""),
///     Selection::new("E1SEG", "OUT2", "", "FIXED"),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     mapping.rules("E1SEG").unwrap(),
///     &[FieldRule::mapped("OUT1", "E1FIELD"), FieldRule::hardcoded("OUT2", "FIXED")]
/// );
/// ```
pub fn build_mapping(selections: impl IntoIterator<Item = Selection>) -> Result<Mapping> {
    let mut mapping = Mapping::new();

    for selection in selections {
        validate_tag_name("segment", &selection.segment)?;
        let rule = build_rule(&selection)?;
        mapping.push_rule(selection.segment, rule);
    }

    Ok(mapping)
}

/// Build a single rule from a selection, validating its output name and
/// hardcoded value.
pub fn build_rule(selection: &Selection) -> Result<FieldRule> {
    validate_tag_name("output field", &selection.output_field)?;
    validate_value(&selection.output_field, &selection.hardcoded_value)?;
    Ok(selection.to_rule())
}
