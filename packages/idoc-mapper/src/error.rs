//! Error types for the mapper.
//!
//! A single `MapperError` enum covers every failure the library can report.
//! [`MapperError::kind`] classifies it into the coarse categories callers
//! act on (parse, transform, serialize, mapping, io).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the mapper library.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Input markup is not well-formed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Input contained nothing but whitespace.
    #[error("Input document is empty")]
    EmptyDocument,

    /// Input document could not be read.
    #[error("Failed to read input {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not valid UTF-8.
    #[error("Input document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Internal invariant violated while building the output tree.
    #[error("Transform failed: {0}")]
    Transform(String),

    /// Writing the serialized output failed.
    #[error("Failed to write output to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A segment or field name cannot be used as an XML tag.
    #[error("Invalid {role} name: '{name}'. Expected an XML name (e.g., E1EDK01)")]
    InvalidName { role: &'static str, name: String },

    /// A literal value holds a character that XML cannot represent.
    #[error("Invalid value for output field '{output}': {value:?} contains a character not allowed in XML")]
    InvalidValue { output: String, value: String },

    /// Mapping file could not be read as YAML.
    #[error("Mapping file is invalid: {0}")]
    MappingFile(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`MapperError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input document could not be read or parsed.
    Parse,
    /// The output tree could not be built.
    Transform,
    /// The output document could not be written.
    Serialize,
    /// The mapping is malformed.
    Mapping,
    /// Reading a mapping file or other non-input IO failed.
    Io,
}

impl MapperError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::XmlParse(_)
            | Self::EmptyDocument
            | Self::ReadInput { .. }
            | Self::InvalidUtf8(_) => ErrorKind::Parse,
            Self::Transform(_) => ErrorKind::Transform,
            Self::Write { .. } => ErrorKind::Serialize,
            Self::InvalidName { .. } | Self::InvalidValue { .. } | Self::MappingFile(_) => {
                ErrorKind::Mapping
            }
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for mapper operations.
pub type Result<T> = std::result::Result<T, MapperError>;
