//! Configuration constants and validation functions for the mapper.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{MapperError, Result};

/// Tag of the principal record wrapper inside an IDoc document.
pub const DEFAULT_CONTAINER_TAG: &str = "IDOC";

/// XML declaration written as the first line of every output document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Indentation used per nesting level in serialized output.
pub const INDENT: &str = "    ";

/// XML name pattern accepted for segment and output field names.
///
/// Deliberately narrower than the full XML `Name` production: IDoc segment
/// and field names are ASCII, and colons would introduce namespace prefixes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static XML_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid regex"));

/// Check whether a string is usable as an element tag.
///
/// # Examples
/// ```
/// use idoc_mapper::config::is_valid_tag_name;
///
/// assert!(is_valid_tag_name("E1EDK01"));
/// assert!(!is_valid_tag_name("1ABC"));
/// assert!(!is_valid_tag_name(""));
/// ```
#[must_use]
pub fn is_valid_tag_name(name: &str) -> bool {
    XML_NAME_PATTERN.is_match(name)
}

/// Validate a segment or output field name.
///
/// # Arguments
/// * `role` - What the name is used for, reported in the error ("segment", "output field")
/// * `name` - The name to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(MapperError::InvalidName)` if invalid
///
/// # Examples
/// ```
/// use idoc_mapper::config::validate_tag_name;
///
/// assert!(validate_tag_name("segment", "E1EDP01").is_ok());
/// assert!(validate_tag_name("output field", "bad name").is_err());
/// ```
pub fn validate_tag_name(role: &'static str, name: &str) -> Result<()> {
    if is_valid_tag_name(name) {
        Ok(())
    } else {
        Err(MapperError::InvalidName {
            role,
            name: name.to_string(),
        })
    }
}

/// Check whether a character matches the XML `Char` production.
///
/// Control characters other than tab, line feed and carriage return, and
/// the noncharacters U+FFFE and U+FFFF cannot appear in an XML document,
/// escaped or not.
#[must_use]
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Validate a literal value for an output field.
///
/// # Examples
/// ```
/// use idoc_mapper::config::validate_value;
///
/// assert!(validate_value("SOURCE", "SAP & co\n").is_ok());
/// assert!(validate_value("SOURCE", "a\u{1}b").is_err());
/// ```
pub fn validate_value(output: &str, value: &str) -> Result<()> {
    if value.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(MapperError::InvalidValue {
            output: output.to_string(),
            value: value.to_string(),
        })
    }
}
