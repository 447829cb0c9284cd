//! XML tree model, parser and serializer.

mod element;
mod parser;
mod writer;

pub use element::{Descendants, Element};
pub use parser::{parse, parse_bytes, read_xml};
pub use writer::{save_xml, to_xml_string};
