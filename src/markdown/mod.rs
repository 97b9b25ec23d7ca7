/// Markdown synthesis for parsed Word documents.
///
/// This module turns the typed element tree of [`crate::docx`] into Markdown
/// text: headings, formatted runs, hyperlinks, images, formulas, lists and
/// tables.
///
/// # Quick Start
///
/// ```rust
/// use docx_md::markdown::ConversionOptions;
/// use docx_md::{CollectingImageSink, convert};
/// use std::collections::HashMap;
///
/// # fn main() -> Result<(), docx_md::Error> {
/// let mut parts = HashMap::new();
/// parts.insert(
///     "word/document.xml".to_string(),
///     br#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#.to_vec(),
/// );
///
/// let mut sink = CollectingImageSink::new();
/// let result = convert(&parts, &ConversionOptions::default(), &mut sink)?;
/// assert_eq!(result.markdown, "Hello");
/// # Ok(())
/// # }
/// ```
///
/// # Architecture
///
/// - [`config`]: Configuration types and enums
/// - [`context`]: Per-pass state: options, side tables, list counters, warnings
/// - [`inline`]: Runs, hyperlinks, images and formulas
/// - [`list`]: List groups and ordered-list counters
/// - [`table`]: Table flattening and layout
/// - [`document`]: Block grouping and the document pass
/// - `writer`: Low-level block joining
pub mod config;
pub mod context;
pub mod document;
pub mod inline;
pub mod list;
pub mod table;
mod writer;

pub use config::{ConversionOptions, FormulaStyle, TableAlignment};
pub use context::{ConversionContext, ListCounterState};
pub use document::{Block, ConversionResult, DocumentSynthesizer, group_blocks};
pub use list::{ListMarker, ListStateMachine};
pub use table::TableSynthesizer;
