/// Document-level Markdown synthesis.
///
/// The top-level element sequence is grouped into single blocks and maximal
/// runs of contiguous list items, then each group is rendered in document
/// order. A block that fails is dropped with a warning; the rest of the
/// document still converts.
use super::context::ConversionContext;
use super::inline::render_inlines;
use super::list::ListStateMachine;
use super::table::TableSynthesizer;
use super::writer::MarkdownWriter;
use crate::common::{Error, Result};
use crate::docx::element::{Alignment, DocxElement, ElementKind};
use log::debug;
use std::fmt::Write as FmtWrite;

/// Output of one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// The Markdown text
    pub markdown: String,
    /// Recoverable problems, in the order they were met
    pub warnings: Vec<String>,
}

/// One unit of block-level output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block<'e> {
    Element(&'e DocxElement),
    List(&'e [DocxElement]),
}

impl Block<'_> {
    fn describe(&self) -> String {
        match self {
            Block::Element(element) => format!("{:?}", element.kind),
            Block::List(items) => format!("list of {} items", items.len()),
        }
    }
}

/// Split top-level elements into blocks, merging contiguous list items.
///
/// Items with different numbering ids still share one group.
pub fn group_blocks(elements: &[DocxElement]) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut start = 0;
    while start < elements.len() {
        if elements[start].is_list_item() {
            let len = elements[start..]
                .iter()
                .take_while(|element| element.is_list_item())
                .count();
            blocks.push(Block::List(&elements[start..start + len]));
            start += len;
        } else {
            blocks.push(Block::Element(&elements[start]));
            start += 1;
        }
    }
    blocks
}

/// Renders a whole document body.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentSynthesizer {
    lists: ListStateMachine,
    tables: TableSynthesizer,
}

impl DocumentSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every block and join them with blank lines.
    pub fn synthesize(&self, ctx: &mut ConversionContext<'_>, elements: &[DocxElement]) -> String {
        let blocks = group_blocks(elements);
        debug!("grouped {} elements into {} blocks", elements.len(), blocks.len());

        let mut writer = MarkdownWriter::new();
        for block in &blocks {
            match self.render_block(ctx, block) {
                Ok(markdown) => {
                    writer.push_block(&markdown);
                },
                Err(err) => {
                    ctx.warn(format!("Failed to convert element: {} ({})", block.describe(), err));
                },
            }
        }
        debug!("wrote {} of {} blocks", writer.block_count(), blocks.len());
        writer.finish()
    }

    fn render_block(&self, ctx: &mut ConversionContext<'_>, block: &Block<'_>) -> Result<String> {
        match block {
            Block::List(items) => Ok(self.lists.render_group(ctx, items)),
            Block::Element(element) => match element.kind {
                ElementKind::Heading => self.render_heading(ctx, element),
                ElementKind::Paragraph => Ok(self.render_paragraph(ctx, element)),
                ElementKind::Table => Ok(self.tables.render(ctx, element)),
                ElementKind::ListItem => Ok(self.lists.render_item(ctx, element)),
                kind => Err(Error::ParseError(format!(
                    "{:?} is not a block element",
                    kind
                ))),
            },
        }
    }

    fn render_heading(&self, ctx: &mut ConversionContext<'_>, element: &DocxElement) -> Result<String> {
        let level = element.props.heading_level.unwrap_or(1).clamp(1, 6) as usize;
        let content = render_inlines(ctx, &element.children);

        let mut out = String::with_capacity(level + 1 + content.len());
        write!(out, "{} {}", "#".repeat(level), content.trim())
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(out)
    }

    fn render_paragraph(&self, ctx: &mut ConversionContext<'_>, element: &DocxElement) -> String {
        let content = render_inlines(ctx, &element.children);
        match element.props.alignment {
            Some(Alignment::Center) if !content.trim().is_empty() => {
                format!("<center>{}</center>", content)
            },
            Some(Alignment::Right) if !content.trim().is_empty() => {
                format!("<div style=\"text-align: right\">{}</div>", content)
            },
            _ => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::element::{ElementProperties, ListRef};
    use crate::docx::package::DocumentPackage;
    use crate::images::CollectingImageSink;
    use crate::markdown::config::ConversionOptions;
    use std::collections::HashMap;

    fn paragraph(text: &str) -> DocxElement {
        DocxElement::new(ElementKind::Paragraph).with_children(vec![
            DocxElement::new(ElementKind::Run).with_children(vec![DocxElement::text(text)]),
        ])
    }

    fn with_props(element: DocxElement, props: ElementProperties) -> DocxElement {
        element.with_props(props)
    }

    fn list_item(num_id: u32, text: &str) -> DocxElement {
        let mut item = paragraph(text);
        item.kind = ElementKind::ListItem;
        with_props(
            item,
            ElementProperties {
                list: Some(ListRef { num_id, level: 0 }),
                ..Default::default()
            },
        )
    }

    fn synthesize(elements: &[DocxElement]) -> (String, Vec<String>) {
        let options = ConversionOptions::default();
        let package = DocumentPackage::default();
        let source: HashMap<String, Vec<u8>> = HashMap::new();
        let mut sink = CollectingImageSink::new();
        let mut ctx = ConversionContext::new(&options, &package, &source, &mut sink);
        let markdown = DocumentSynthesizer::new().synthesize(&mut ctx, elements);
        (markdown, ctx.into_warnings())
    }

    #[test]
    fn test_grouping_preserves_order() {
        let elements = vec![
            paragraph("a"),
            list_item(1, "x"),
            list_item(2, "y"),
            paragraph("b"),
            list_item(1, "z"),
        ];
        let blocks = group_blocks(&elements);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[1], Block::List(items) if items.len() == 2));
        assert!(matches!(blocks[3], Block::List(items) if items.len() == 1));
    }

    #[test]
    fn test_headings_are_clamped() {
        let heading = |level: u8, text: &str| {
            let mut element = paragraph(text);
            element.kind = ElementKind::Heading;
            with_props(
                element,
                ElementProperties {
                    heading_level: Some(level),
                    ..Default::default()
                },
            )
        };
        let (markdown, _) = synthesize(&[heading(2, "Two"), heading(9, "Deep"), heading(0, "Zero")]);
        assert_eq!(markdown, "## Two\n\n###### Deep\n\n# Zero");
    }

    #[test]
    fn test_alignment_wrappers() {
        let aligned = |alignment: Alignment, text: &str| {
            with_props(
                paragraph(text),
                ElementProperties {
                    alignment: Some(alignment),
                    ..Default::default()
                },
            )
        };
        let (markdown, _) = synthesize(&[
            aligned(Alignment::Center, "mid"),
            aligned(Alignment::Right, "end"),
            aligned(Alignment::Justify, "full"),
        ]);
        assert_eq!(
            markdown,
            "<center>mid</center>\n\n<div style=\"text-align: right\">end</div>\n\nfull"
        );
    }

    #[test]
    fn test_blank_blocks_are_dropped() {
        let (markdown, warnings) = synthesize(&[paragraph("a"), paragraph("  "), paragraph("b")]);
        assert_eq!(markdown, "a\n\nb");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_failed_block_becomes_warning() {
        let stray = DocxElement::new(ElementKind::TableRow);
        let (markdown, warnings) = synthesize(&[paragraph("a"), stray, paragraph("b")]);
        assert_eq!(markdown, "a\n\nb");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to convert element: TableRow"));
    }

    #[test]
    fn test_list_items_render_together() {
        let (markdown, _) = synthesize(&[list_item(1, "x"), list_item(1, "y"), paragraph("after")]);
        assert_eq!(markdown, "- x\n- y\n\nafter");
    }

    #[test]
    fn test_empty_document() {
        let (markdown, warnings) = synthesize(&[]);
        assert_eq!(markdown, "");
        assert!(warnings.is_empty());
    }
}
