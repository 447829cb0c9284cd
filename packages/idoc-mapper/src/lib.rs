//! IDoc Mapper - Rule-driven transformation of IDoc XML documents.
//!
//! This crate reads an IDoc-style XML document, applies a declarative
//! mapping (segment name to output field rules) and produces a new XML
//! document.
//!
//! # Example
//!
//! ```
//! use idoc_mapper::mapping::{build_mapping, Selection};
//! use idoc_mapper::{discover_segments, parse, to_xml_string, transform};
//!
//! let input = parse(r#"<ENVELOPE><IDOC BEGIN="1"><E1SEG><E1FIELD>A</E1FIELD></E1SEG></IDOC></ENVELOPE>"#).unwrap();
//! assert!(discover_segments(&input).contains_key("E1SEG"));
//!
//! let mapping = build_mapping([Selection::new("E1SEG", "OUT1", "E1FIELD", "")]).unwrap();
//! let output = transform(&input, &mapping).unwrap();
//! assert!(to_xml_string(&output).contains("<OUT1>A</OUT1>"));
//! ```
//!
//! # Architecture
//!
//! The mapper is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Element tree, parser and serializer
//! - [`mapping`]: Field rules, mappings and mapping files
//! - [`discovery`]: Segment and candidate field discovery
//! - [`transform`]: The transform engine
//! - [`mapper`]: End-to-end mapping of documents and files
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod mapper;
pub mod mapping;
pub mod transform;
pub mod xml;

// Re-export main functions
pub use discovery::{discover_segments, SegmentCatalog};
pub use mapper::{map_document, map_file};
pub use transform::{transform, transform_with, TransformConfig};
pub use xml::{parse, to_xml_string, Element};

// Re-export commonly used items
pub use error::{ErrorKind, MapperError, Result};
pub use mapping::{build_mapping, FieldRule, Mapping, MappingFile, Selection};
