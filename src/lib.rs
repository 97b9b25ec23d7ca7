//! docx-md - Convert Word documents to Markdown
//!
//! This library converts the XML parts of a WordprocessingML (`.docx`)
//! package into Markdown, with embedded Office Math rendered as LaTeX.
//!
//! # Features
//!
//! - **Structure**: headings, paragraphs, alignment, hyperlinks and tables
//! - **Formatting**: bold, italic, strikethrough, highlight, underline, scripts
//! - **Lists**: multi-level ordered lists with per-level counters, bullet fallback
//! - **Math**: OMML to LaTeX, inline and display
//! - **Images**: referenced media handed to a pluggable [`ImageSink`]
//!
//! The package container is not opened here. Callers unpack the parts and
//! provide them through [`PartSource`], which is implemented for in-memory
//! maps.
//!
//! # Example
//!
//! ```
//! use docx_md::{CollectingImageSink, ConversionOptions, FormulaStyle, convert};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), docx_md::Error> {
//! let mut parts = HashMap::new();
//! parts.insert(
//!     "word/document.xml".to_string(),
//!     br#"<w:document xmlns:w="w"><w:body>
//!         <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
//!         <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r></w:p>
//!     </w:body></w:document>"#
//!         .to_vec(),
//! );
//!
//! let options = ConversionOptions::new().with_formula_style(FormulaStyle::LaTeX);
//! let mut sink = CollectingImageSink::new();
//! let result = convert(&parts, &options, &mut sink)?;
//! assert_eq!(result.markdown, "# Title\n\n**Bold**");
//! assert!(result.warnings.is_empty());
//! # Ok(())
//! # }
//! ```

/// Common types and utilities shared by the parsers and synthesizers
pub mod common;

/// WordprocessingML structure extraction
///
/// This module reads `word/document.xml` and its side tables (styles,
/// numbering, relationships, media) into typed values.
pub mod docx;

/// OMML to LaTeX conversion
pub mod formula;

/// Image hand-off to the caller
pub mod images;

/// Markdown synthesis
pub mod markdown;

pub use common::{Error, Result};
pub use docx::{DocumentPackage, PartSource};
pub use images::{CollectingImageSink, ImageRequest, ImageSink, StoredImage};
pub use markdown::{
    ConversionContext, ConversionOptions, ConversionResult, DocumentSynthesizer, FormulaStyle,
    TableAlignment,
};

use log::debug;

/// Convert an unpacked package to Markdown.
///
/// Fails only when `word/document.xml` is missing or unreadable. Every other
/// problem degrades the output and is reported in
/// [`ConversionResult::warnings`].
pub fn convert<P>(
    source: &P,
    options: &ConversionOptions,
    sink: &mut dyn ImageSink,
) -> Result<ConversionResult>
where
    P: PartSource,
{
    let package = DocumentPackage::load(source)?;
    Ok(convert_package(&package, source, options, sink))
}

/// Convert an already loaded package.
///
/// `source` must be the part source the package was loaded from; image bytes
/// are read from it on demand.
pub fn convert_package(
    package: &DocumentPackage,
    source: &dyn PartSource,
    options: &ConversionOptions,
    sink: &mut dyn ImageSink,
) -> ConversionResult {
    let mut ctx = ConversionContext::new(options, package, source, sink);
    let markdown = DocumentSynthesizer::new().synthesize(&mut ctx, &package.body.elements);

    let mut warnings = package.body.warnings.clone();
    warnings.extend(ctx.into_warnings());
    debug!(
        "converted {} blocks with {} warnings",
        package.body.elements.len(),
        warnings.len()
    );

    ConversionResult { markdown, warnings }
}
