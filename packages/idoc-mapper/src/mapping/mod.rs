//! Mapping model: which output fields to build for which input segments.

mod builder;
mod file;
mod types;

pub use builder::{build_mapping, build_rule};
pub use file::{FieldEntry, MappingFile, SegmentEntry};
pub use types::{FieldRule, Mapping, Selection};
