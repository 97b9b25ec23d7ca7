//! Table synthesis.
//!
//! Merged cells are flattened: a cell spanning `n` grid columns is followed by
//! `n - 1` empty cells, and short rows are padded on the right. The first row
//! is always the header.
use super::context::ConversionContext;
use super::inline::render_inlines;
use crate::common::xml::escape_table_cell;
use crate::docx::element::DocxElement;

/// Renders [`ElementKind::Table`](crate::docx::ElementKind::Table) elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableSynthesizer;

impl TableSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Render a table. A table without rows renders as an empty string.
    pub fn render(&self, ctx: &mut ConversionContext<'_>, table: &DocxElement) -> String {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.children.len());
        let mut width = 0;

        for row in &table.children {
            let mut cells = Vec::with_capacity(row.children.len());
            for cell in &row.children {
                cells.push(self.render_cell(ctx, cell));
                cells.extend(std::iter::repeat_n(String::new(), cell.props.colspan() - 1));
            }
            width = width.max(cells.len());
            rows.push(cells);
        }
        if rows.is_empty() {
            return String::new();
        }
        for row in rows.iter_mut() {
            row.resize(width, String::new());
        }

        let marker = ctx.options.table_alignment.marker();
        let mut lines = Vec::with_capacity(rows.len() + 1);
        let separator = vec![marker; width];
        lines.push(format_row(rows[0].as_slice()));
        lines.push(format_row(separator.as_slice()));
        lines.extend(rows[1..].iter().map(|row| format_row(row.as_slice())));
        lines.join("\n")
    }

    /// Cell content: non-empty paragraphs joined with `<br>`, then escaped.
    fn render_cell(&self, ctx: &mut ConversionContext<'_>, cell: &DocxElement) -> String {
        let mut paragraphs = Vec::with_capacity(cell.children.len());
        for block in &cell.children {
            let content = render_inlines(ctx, &block.children);
            let content = content.trim();
            if !content.is_empty() {
                paragraphs.push(content.to_string());
            }
        }
        escape_table_cell(&paragraphs.join("<br>"))
    }
}

fn format_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell.as_ref());
        line.push_str(" |");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::element::{ElementKind, ElementProperties};
    use crate::docx::package::DocumentPackage;
    use crate::images::CollectingImageSink;
    use crate::markdown::config::{ConversionOptions, TableAlignment};
    use std::collections::HashMap;

    fn paragraph(text: &str) -> DocxElement {
        DocxElement::new(ElementKind::Paragraph).with_children(vec![
            DocxElement::new(ElementKind::Run).with_children(vec![DocxElement::text(text)]),
        ])
    }

    fn cell(paragraphs: &[&str], span: Option<u32>) -> DocxElement {
        DocxElement::new(ElementKind::TableCell)
            .with_children(paragraphs.iter().map(|text| paragraph(text)).collect())
            .with_props(ElementProperties {
                grid_span: span,
                ..Default::default()
            })
    }

    fn table(rows: Vec<Vec<DocxElement>>) -> DocxElement {
        DocxElement::new(ElementKind::Table).with_children(
            rows.into_iter()
                .map(|cells| DocxElement::new(ElementKind::TableRow).with_children(cells))
                .collect(),
        )
    }

    fn render(options: &ConversionOptions, table: &DocxElement) -> String {
        let package = DocumentPackage::default();
        let source: HashMap<String, Vec<u8>> = HashMap::new();
        let mut sink = CollectingImageSink::new();
        let mut ctx = ConversionContext::new(options, &package, &source, &mut sink);
        TableSynthesizer::new().render(&mut ctx, table)
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let input = table(vec![
            vec![cell(&["a"], None), cell(&["b"], None), cell(&["c"], None)],
            vec![cell(&["d"], None)],
            vec![cell(&["e"], Some(2))],
        ]);
        assert_eq!(
            render(&ConversionOptions::default(), &input),
            "| a | b | c |\n| --- | --- | --- |\n| d |  |  |\n| e |  |  |"
        );
    }

    #[test]
    fn test_colspan_widens_header() {
        let input = table(vec![
            vec![cell(&["wide"], Some(3))],
            vec![cell(&["1"], None), cell(&["2"], None)],
        ]);
        let options = ConversionOptions::new().with_table_alignment(TableAlignment::Center);
        assert_eq!(
            render(&options, &input),
            "| wide |  |  |\n| :---: | :---: | :---: |\n| 1 | 2 |  |"
        );
    }

    #[test]
    fn test_cell_paragraphs_and_escaping() {
        let input = table(vec![vec![cell(&["one", "", "a|b"], None)]]);
        assert_eq!(
            render(&ConversionOptions::default(), &input),
            "| one<br>a\\|b |\n| --- |"
        );
    }

    #[test]
    fn test_line_break_inside_cell() {
        let para = DocxElement::new(ElementKind::Paragraph).with_children(vec![
            DocxElement::new(ElementKind::Run).with_children(vec![
                DocxElement::text("x"),
                DocxElement::new(ElementKind::Break),
                DocxElement::text("y"),
            ]),
        ]);
        let input = table(vec![vec![
            DocxElement::new(ElementKind::TableCell).with_children(vec![para]),
        ]]);
        let options = ConversionOptions::new().with_table_alignment(TableAlignment::Right);
        assert_eq!(render(&options, &input), "| x<br>y |\n| ---: |");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render(&ConversionOptions::default(), &table(Vec::new())), "");
    }
}
