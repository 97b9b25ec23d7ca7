//! WordprocessingML structure extraction.
//!
//! This module turns the unpacked parts of a `.docx` package into a typed
//! element tree and the side tables needed to render it:
//!
//! - [`parser`]: body paragraphs, runs, tables, hyperlinks, images and math payloads
//! - [`styles`]: style ids and display names, used for heading detection
//! - [`numbering`]: abstract numbering definitions and instances
//! - [`rels`]: relationship ids of hyperlinks and images
//! - [`media`]: the media parts available to image references
//! - [`package`]: the [`PartSource`] seam and concurrent loading

pub mod element;
pub mod media;
pub mod numbering;
pub mod package;
pub mod parser;
pub mod rels;
pub mod styles;

pub use element::{Alignment, DocxElement, ElementKind, ElementProperties, ListRef};
pub use media::{MediaIndex, MediaItem};
pub use numbering::{AbstractNumbering, NumberingLevel, NumberingTable};
pub use package::{DocumentPackage, PartSource};
pub use parser::{ParsedBody, StructuralParser};
pub use rels::{Relationship, RelationshipTable};
pub use styles::{StyleDefinition, StyleTable};
