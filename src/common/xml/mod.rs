//! Generic XML handling shared by the structural and math parsers.
//!
//! - [`node`]: an owned, order-preserving element tree built from quick-xml events
//! - [`escape`]: Markdown-side escaping helpers

pub mod escape;
pub mod node;

pub use escape::escape_table_cell;
pub use node::{MAX_NESTING_DEPTH, XmlElement, XmlNode, local_name, parse_xml};
