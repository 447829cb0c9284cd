//! Main mapper service that ties all components together.

use std::path::Path;

use crate::error::Result;
use crate::mapping::MappingFile;
use crate::transform::transform_with;
use crate::xml::{parse, read_xml, save_xml, to_xml_string, Element};

/// Map an input document held in memory.
///
/// # Arguments
/// * `input_xml` - The input document text
/// * `mapping` - Parsed mapping file
///
/// # Returns
/// The serialized output document
///
/// # Examples
/// ```
/// use idoc_mapper::mapper::map_document;
/// use idoc_mapper::mapping::MappingFile;
///
/// let mapping = MappingFile::from_yaml(
///     "segments:\n  - name: E1SEG\n    fields:\n      - output: OUT1\n        input: E1FIELD\n",
/// )
/// .unwrap();
/// let xml = map_document("<R><IDOC><E1SEG><E1FIELD>A</E1FIELD></E1SEG></IDOC></R>", &mapping).unwrap();
/// assert!(xml.contains("<OUT1>A</OUT1>"));
/// ```
pub fn map_document(input_xml: &str, mapping: &MappingFile) -> Result<String> {
    let input = parse(input_xml)?;
    let output = apply(&input, mapping)?;
    Ok(to_xml_string(&output))
}

/// Map an input file and write the result to `output_path`.
///
/// Nothing is written unless every step succeeds, and the output file is
/// replaced atomically.
///
/// # Arguments
/// * `input_path` - Input XML file
/// * `mapping` - Parsed mapping file
/// * `output_path` - Destination file
///
/// # Returns
/// The output tree that was written
pub fn map_file(input_path: &Path, mapping: &MappingFile, output_path: &Path) -> Result<Element> {
    let input = read_xml(input_path)?;
    let output = apply(&input, mapping)?;
    save_xml(&output, output_path)?;

    tracing::debug!(
        input = %input_path.display(),
        output = %output_path.display(),
        "Wrote mapped document"
    );
    Ok(output)
}

/// Map an input file and return the serialized output without writing it.
pub fn preview_file(input_path: &Path, mapping: &MappingFile) -> Result<String> {
    let input = read_xml(input_path)?;
    let output = apply(&input, mapping)?;
    Ok(to_xml_string(&output))
}

/// Validate the mapping file and run the transform.
fn apply(input: &Element, mapping: &MappingFile) -> Result<Element> {
    let rules = mapping.to_mapping()?;
    let config = mapping.transform_config()?;
    transform_with(input, &rules, &config)
}
