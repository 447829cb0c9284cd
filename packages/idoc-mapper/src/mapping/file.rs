//! YAML mapping files.
//!
//! A mapping file lists segments in output order, each with its fields:
//!
//! ```yaml
//! container: IDOC
//! segments:
//!   - name: E1EDK01
//!     fields:
//!       - output: CURRENCY
//!         input: CURCY
//!       - output: SOURCE
//!         value: SAP
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::build_rule;
use super::types::{Mapping, Selection};
use crate::config::{is_valid_tag_name, validate_tag_name, DEFAULT_CONTAINER_TAG};
use crate::discovery::SegmentCatalog;
use crate::error::Result;
use crate::transform::TransformConfig;

/// Mapping file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingFile {
    /// Container tag; defaults to `IDOC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Segments in output order.
    #[serde(default)]
    pub segments: Vec<SegmentEntry>,
}

/// One segment of a mapping file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentEntry {
    /// Segment tag in the input document.
    pub name: String,

    /// Output fields in order.
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// One output field of a mapping file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    /// Output field tag.
    pub output: String,

    /// Input child tag to copy text from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Literal value; wins over `input`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MappingFile {
    /// Parse a mapping file from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Build the validated [`Mapping`].
    ///
    /// Segments listed more than once are merged at their first position.
    ///
    /// # Errors
    /// * `MapperError::InvalidName` for a segment or output name that is not an XML name
    /// * `MapperError::InvalidValue` for a literal value XML cannot represent
    pub fn to_mapping(&self) -> Result<Mapping> {
        let mut mapping = Mapping::new();

        for segment in &self.segments {
            validate_tag_name("segment", &segment.name)?;
            let rules = mapping.insert_segment(segment.name.as_str());

            for field in &segment.fields {
                let selection = Selection::new(
                    segment.name.as_str(),
                    field.output.as_str(),
                    field.input.as_deref().unwrap_or_default(),
                    field.value.as_deref().unwrap_or_default(),
                );
                rules.push(build_rule(&selection)?);
            }
        }

        Ok(mapping)
    }

    /// Transform settings declared by this file.
    ///
    /// # Errors
    /// `MapperError::InvalidName` if the container tag is not an XML name.
    pub fn transform_config(&self) -> Result<TransformConfig> {
        match &self.container {
            Some(tag) => {
                validate_tag_name("container", tag)?;
                Ok(TransformConfig::new(tag.as_str()))
            }
            None => Ok(TransformConfig::default()),
        }
    }

    /// Starting-point mapping generated from discovered segments.
    ///
    /// Every segment that has children becomes an entry copying each
    /// candidate field to an output field of the same name. The container
    /// itself and childless tags (plain fields) are left out, as are
    /// segments and fields whose names [`to_mapping`](Self::to_mapping)
    /// would reject (non-ASCII names, for instance).
    pub fn skeleton(catalog: &SegmentCatalog, container: &str) -> Self {
        let segments = catalog
            .iter()
            .filter(|(name, fields)| name.as_str() != container && !fields.is_empty())
            .filter(|(name, _)| {
                let usable = is_valid_tag_name(name);
                if !usable {
                    tracing::debug!(segment = %name, "Skipping segment with unsupported name");
                }
                usable
            })
            .map(|(name, fields)| SegmentEntry {
                name: name.clone(),
                fields: fields
                    .iter()
                    .filter(|field| is_valid_tag_name(field))
                    .map(|field| FieldEntry {
                        output: field.clone(),
                        input: Some(field.clone()),
                        value: None,
                    })
                    .collect(),
            })
            .collect();

        Self {
            container: (container != DEFAULT_CONTAINER_TAG).then(|| container.to_string()),
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, MapperError};
    use crate::mapping::FieldRule;
    use indexmap::{IndexMap, IndexSet};

    const SAMPLE: &str = r"
container: ORDERS05
segments:
  - name: E1EDK01
    fields:
      - output: CURRENCY
        input: CURCY
      - output: SOURCE
        value: SAP
        input: IGNORED
      - output: NOTE
  - name: E1EDP01
";

    #[test]
    fn test_from_yaml() {
        let file = MappingFile::from_yaml(SAMPLE).unwrap();
        assert_eq!(file.container.as_deref(), Some("ORDERS05"));
        assert_eq!(file.segments.len(), 2);
        assert_eq!(file.segments[0].fields.len(), 3);
        assert!(file.segments[1].fields.is_empty());
    }

    #[test]
    fn test_to_mapping() {
        let mapping = MappingFile::from_yaml(SAMPLE).unwrap().to_mapping().unwrap();

        assert_eq!(
            mapping.rules("E1EDK01").unwrap(),
            &[
                FieldRule::mapped("CURRENCY", "CURCY"),
                FieldRule::hardcoded("SOURCE", "SAP"),
                FieldRule::empty("NOTE"),
            ]
        );
        assert_eq!(mapping.rules("E1EDP01"), Some(&[][..]));
    }

    #[test]
    fn test_empty_strings_behave_like_absent() {
        let yaml = "segments:\n  - name: S\n    fields:\n      - output: O\n        input: ''\n        value: ''\n";
        let mapping = MappingFile::from_yaml(yaml).unwrap().to_mapping().unwrap();
        assert_eq!(mapping.rules("S").unwrap(), &[FieldRule::empty("O")]);
    }

    #[test]
    fn test_repeated_segment_merged() {
        let yaml = "segments:\n  - name: A\n    fields:\n      - output: A1\n  - name: B\n  - name: A\n    fields:\n      - output: A2\n";
        let mapping = MappingFile::from_yaml(yaml).unwrap().to_mapping().unwrap();

        let order: Vec<_> = mapping.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["A", "B"]);
        assert_eq!(
            mapping.rules("A").unwrap(),
            &[FieldRule::empty("A1"), FieldRule::empty("A2")]
        );
    }

    #[test]
    fn test_invalid_names_rejected() {
        let yaml = "segments:\n  - name: S\n    fields:\n      - output: 'has space'\n";
        let err = MappingFile::from_yaml(yaml).unwrap().to_mapping().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_control_character_value_rejected() {
        let yaml = "segments:\n  - name: S\n    fields:\n      - output: O\n        value: \"a\\x01b\"\n";
        let file = MappingFile::from_yaml(yaml).unwrap();
        assert_eq!(file.segments[0].fields[0].value.as_deref(), Some("a\u{1}b"));

        let err = file.to_mapping().unwrap_err();
        assert!(matches!(err, MapperError::InvalidValue { .. }));
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = "segments:\n  - name: S\n    feilds: []\n";
        let err = MappingFile::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, MapperError::MappingFile(_)));
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_transform_config() {
        let file = MappingFile::from_yaml(SAMPLE).unwrap();
        assert_eq!(file.transform_config().unwrap().container_tag(), "ORDERS05");

        let default = MappingFile::default();
        assert_eq!(
            default.transform_config().unwrap().container_tag(),
            DEFAULT_CONTAINER_TAG
        );

        let bad = MappingFile {
            container: Some("not valid".to_string()),
            segments: Vec::new(),
        };
        assert!(bad.transform_config().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let file = MappingFile::from_yaml(SAMPLE).unwrap();
        let again = MappingFile::from_yaml(&file.to_yaml().unwrap()).unwrap();
        assert_eq!(again, file);
    }

    #[test]
    fn test_skeleton() {
        let mut catalog: SegmentCatalog = IndexMap::new();
        catalog.insert("IDOC".to_string(), IndexSet::from(["E1SEG".to_string()]));
        catalog.insert(
            "E1SEG".to_string(),
            IndexSet::from(["F1".to_string(), "F2".to_string()]),
        );
        catalog.insert("F1".to_string(), IndexSet::new());
        catalog.insert("F2".to_string(), IndexSet::new());

        let skeleton = MappingFile::skeleton(&catalog, "IDOC");

        assert!(skeleton.container.is_none());
        assert_eq!(skeleton.segments.len(), 1);
        assert_eq!(skeleton.segments[0].name, "E1SEG");
        assert_eq!(
            skeleton.to_mapping().unwrap().rules("E1SEG").unwrap(),
            &[FieldRule::mapped("F1", "F1"), FieldRule::mapped("F2", "F2")]
        );
    }

    #[test]
    fn test_skeleton_skips_unsupported_names() {
        let mut catalog: SegmentCatalog = IndexMap::new();
        catalog.insert(
            "E1SEG".to_string(),
            IndexSet::from(["F1".to_string(), "FELD\u{dc}".to_string()]),
        );
        catalog.insert("SEGM\u{c9}NT".to_string(), IndexSet::from(["F1".to_string()]));

        let skeleton = MappingFile::skeleton(&catalog, "IDOC");

        let names: Vec<_> = skeleton.segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["E1SEG"]);
        assert_eq!(
            skeleton.to_mapping().unwrap().rules("E1SEG").unwrap(),
            &[FieldRule::mapped("F1", "F1")]
        );
    }

    #[test]
    fn test_skeleton_custom_container() {
        let skeleton = MappingFile::skeleton(&SegmentCatalog::new(), "ORDERS05");
        assert_eq!(skeleton.container.as_deref(), Some("ORDERS05"));
        assert!(skeleton.segments.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = MappingFile::load(Path::new("no/such/mapping.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
