//! Structural parser: generic XML tree of `word/document.xml` to typed elements.
//!
//! Paragraph roles and run formatting are decided here. Math is captured
//! verbatim and left for the formula pipeline. Malformed attribute values
//! drop the affected property and add a warning; they never fail the parse.
use crate::common::error::Result;
use crate::common::xml::{XmlElement, parse_xml};
use crate::docx::element::{
    Alignment, DocxElement, ElementKind, ElementProperties, ListRef, MAX_GRID_SPAN, MAX_LIST_LEVEL,
};
use crate::docx::styles::{StyleTable, heading_level};
use log::{debug, warn};

/// Output of a body parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedBody {
    /// Top-level blocks in document order
    pub elements: Vec<DocxElement>,
    pub warnings: Vec<String>,
}

/// Parses the document body into [`DocxElement`] blocks.
#[derive(Debug, Default)]
pub struct StructuralParser {
    warnings: Vec<String>,
}

impl StructuralParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw document part.
    ///
    /// Unparsable XML is fatal. A document without `w:body` is empty.
    pub fn parse_document(mut self, xml: &str) -> Result<ParsedBody> {
        let root = parse_xml(xml)?;
        let body = if root.local_name() == "body" {
            Some(&root)
        } else {
            root.find_descendant("body")
        };

        let mut elements = Vec::new();
        if let Some(body) = body {
            for block in body.elements() {
                self.parse_block(block, &mut elements);
            }
        }
        debug!("parsed {} top-level blocks", elements.len());

        Ok(ParsedBody {
            elements,
            warnings: self.warnings,
        })
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn parse_block(&mut self, el: &XmlElement, out: &mut Vec<DocxElement>) {
        match el.local_name() {
            "p" => out.push(self.parse_paragraph(el)),
            "tbl" => out.push(self.parse_table(el)),
            "sdt" => {
                if let Some(content) = el.child("sdtContent") {
                    for block in content.elements() {
                        self.parse_block(block, out);
                    }
                }
            },
            "AlternateContent" => {
                if let Some(branch) = alternate_branch(el) {
                    for block in branch.elements() {
                        self.parse_block(block, out);
                    }
                }
            },
            "sectPr" => {},
            // customXml and unrecognized wrappers are transparent
            _ => {
                for block in el.elements() {
                    self.parse_block(block, out);
                }
            },
        }
    }

    fn parse_paragraph(&mut self, el: &XmlElement) -> DocxElement {
        let mut props = ElementProperties::default();
        if let Some(ppr) = el.child("pPr") {
            props.style_id = ppr
                .child("pStyle")
                .and_then(|style| style.attr("val"))
                .map(str::to_string);
            props.list = ppr.child("numPr").and_then(|num_pr| self.parse_num_pr(num_pr));
            props.alignment = ppr
                .child("jc")
                .and_then(|jc| jc.attr("val"))
                .and_then(Alignment::from_jc);
        }
        props.heading_level = props.style_id.as_deref().and_then(heading_level);

        let kind = if props.heading_level.is_some() {
            ElementKind::Heading
        } else if props.list.is_some() {
            ElementKind::ListItem
        } else {
            ElementKind::Paragraph
        };

        let mut children = Vec::new();
        self.collect_inline(el, &mut children);
        DocxElement::new(kind).with_children(children).with_props(props)
    }

    fn parse_num_pr(&mut self, num_pr: &XmlElement) -> Option<ListRef> {
        let raw_id = num_pr.child("numId")?.attr("val")?;
        let num_id = match atoi_simd::parse::<u32, false, false>(raw_id.as_bytes()) {
            Ok(id) => id,
            Err(_) => {
                self.warn(format!("Ignoring list paragraph with invalid numId '{}'", raw_id));
                return None;
            },
        };
        // numId 0 removes inherited numbering
        if num_id == 0 {
            return None;
        }

        let level = match num_pr.child("ilvl").and_then(|ilvl| ilvl.attr("val")) {
            None => 0,
            Some(raw) => match atoi_simd::parse::<u32, false, false>(raw.as_bytes()) {
                Ok(level) if level > MAX_LIST_LEVEL => {
                    self.warn(format!(
                        "List level {} out of range, using level {}",
                        level, MAX_LIST_LEVEL
                    ));
                    MAX_LIST_LEVEL
                },
                Ok(level) => level,
                Err(_) => {
                    self.warn(format!("Invalid list level '{}', using level 0", raw));
                    0
                },
            },
        };
        Some(ListRef { num_id, level })
    }

    /// Lift runs, links and math out of a paragraph-level container.
    fn collect_inline(&mut self, el: &XmlElement, out: &mut Vec<DocxElement>) {
        for child in el.elements() {
            match child.local_name() {
                "r" => out.push(self.parse_run(child)),
                "hyperlink" => out.push(self.parse_hyperlink(child)),
                "oMath" => out.push(formula(child, false)),
                "oMathPara" => out.push(formula(child, true)),
                "fldSimple" | "smartTag" | "ins" | "customXml" | "moveTo" => {
                    self.collect_inline(child, out);
                },
                "sdt" => {
                    if let Some(content) = child.child("sdtContent") {
                        self.collect_inline(content, out);
                    }
                },
                "AlternateContent" => {
                    if let Some(branch) = alternate_branch(child) {
                        self.collect_inline(branch, out);
                    }
                },
                "pPr" | "del" | "moveFrom" => {},
                _ => {
                    let mut children = Vec::new();
                    self.collect_inline(child, &mut children);
                    if !children.is_empty() {
                        out.push(DocxElement::new(ElementKind::Unknown).with_children(children));
                    }
                },
            }
        }
    }

    fn parse_hyperlink(&mut self, el: &XmlElement) -> DocxElement {
        let props = ElementProperties {
            link_id: el.attr("id").map(str::to_string),
            anchor: el.attr("anchor").map(str::to_string),
            ..Default::default()
        };
        let mut children = Vec::new();
        self.collect_inline(el, &mut children);
        DocxElement::new(ElementKind::Hyperlink)
            .with_children(children)
            .with_props(props)
    }

    fn parse_run(&mut self, el: &XmlElement) -> DocxElement {
        let mut props = ElementProperties::default();
        if let Some(rpr) = el.child("rPr") {
            apply_run_properties(rpr, &mut props);
        }

        let mut children = Vec::new();
        self.collect_run_content(el, &mut children);
        DocxElement::new(ElementKind::Run)
            .with_children(children)
            .with_props(props)
    }

    fn collect_run_content(&mut self, el: &XmlElement, children: &mut Vec<DocxElement>) {
        for child in el.elements() {
            match child.local_name() {
                "t" => children.push(DocxElement::text(child.text_content())),
                "br" | "cr" => children.push(DocxElement::new(ElementKind::Break)),
                "tab" => children.push(DocxElement::new(ElementKind::Tab)),
                "noBreakHyphen" => children.push(DocxElement::text("-")),
                "sym" => {
                    if let Some(ch) = child.attr("char").and_then(symbol_char) {
                        children.push(DocxElement::text(ch.to_string()));
                    }
                },
                "drawing" | "pict" | "object" => {
                    if let Some(image_id) = find_image_reference(child) {
                        let image = DocxElement::new(ElementKind::Image).with_props(
                            ElementProperties {
                                image_id: Some(image_id.to_string()),
                                ..Default::default()
                            },
                        );
                        children.push(image);
                    }
                },
                "oMath" => children.push(formula(child, false)),
                "AlternateContent" => {
                    if let Some(branch) = alternate_branch(child) {
                        self.collect_run_content(branch, children);
                    }
                },
                "rPr" => {},
                _ => {
                    let mut nested = Vec::new();
                    self.collect_run_content(child, &mut nested);
                    if !nested.is_empty() {
                        children.push(DocxElement::new(ElementKind::Unknown).with_children(nested));
                    }
                },
            }
        }
    }

    fn parse_table(&mut self, el: &XmlElement) -> DocxElement {
        let mut rows = Vec::new();
        for tr in el.children_named("tr") {
            let mut cells = Vec::new();
            for tc in tr.children_named("tc") {
                cells.push(self.parse_cell(tc));
            }
            rows.push(DocxElement::new(ElementKind::TableRow).with_children(cells));
        }
        DocxElement::new(ElementKind::Table).with_children(rows)
    }

    fn parse_cell(&mut self, tc: &XmlElement) -> DocxElement {
        let mut props = ElementProperties::default();
        if let Some(tc_pr) = tc.child("tcPr") {
            if let Some(raw) = tc_pr.child("gridSpan").and_then(|span| span.attr("val")) {
                match atoi_simd::parse::<u32, false, false>(raw.as_bytes()) {
                    Ok(span) if span > MAX_GRID_SPAN => {
                        self.warn(format!(
                            "gridSpan {} out of range, using {}",
                            span, MAX_GRID_SPAN
                        ));
                        props.grid_span = Some(MAX_GRID_SPAN);
                    },
                    Ok(span) => props.grid_span = Some(span),
                    Err(_) => self.warn(format!("Invalid gridSpan '{}', using 1", raw)),
                }
            }
            if tc_pr
                .child("vMerge")
                .and_then(|merge| merge.attr("val"))
                .is_some_and(|val| val == "restart")
            {
                props.row_span = Some(1);
            }
        }

        let mut blocks = Vec::new();
        self.collect_cell_blocks(tc, &mut blocks);
        DocxElement::new(ElementKind::TableCell)
            .with_children(blocks)
            .with_props(props)
    }

    /// Cell content; nested tables are flattened into their paragraphs.
    fn collect_cell_blocks(&mut self, el: &XmlElement, out: &mut Vec<DocxElement>) {
        for child in el.elements() {
            match child.local_name() {
                "p" => out.push(self.parse_paragraph(child)),
                "tbl" => {
                    for tr in child.children_named("tr") {
                        for tc in tr.children_named("tc") {
                            self.collect_cell_blocks(tc, out);
                        }
                    }
                },
                "sdt" => {
                    if let Some(content) = child.child("sdtContent") {
                        self.collect_cell_blocks(content, out);
                    }
                },
                "AlternateContent" => {
                    if let Some(branch) = alternate_branch(child) {
                        self.collect_cell_blocks(branch, out);
                    }
                },
                "tcPr" => {},
                _ => self.collect_cell_blocks(child, out),
            }
        }
    }
}

/// Promote paragraphs whose style display name names a heading.
///
/// Runs after the style table is available, so the body parse does not
/// have to wait for it.
pub fn resolve_heading_styles(elements: &mut [DocxElement], styles: &StyleTable) {
    if styles.is_empty() {
        return;
    }
    for element in elements.iter_mut() {
        match element.kind {
            ElementKind::Paragraph | ElementKind::ListItem => {
                if let Some(level) = element
                    .props
                    .style_id
                    .as_deref()
                    .and_then(|id| styles.heading_level(id))
                {
                    element.kind = ElementKind::Heading;
                    element.props.heading_level = Some(level);
                }
            },
            ElementKind::Table => {
                for row in element.children.iter_mut() {
                    for cell in row.children.iter_mut() {
                        resolve_heading_styles(&mut cell.children, styles);
                    }
                }
            },
            _ => {},
        }
    }
}

fn formula(el: &XmlElement, display: bool) -> DocxElement {
    DocxElement::new(ElementKind::Formula).with_props(ElementProperties {
        math: Some(el.clone()),
        display,
        ..Default::default()
    })
}

/// Markup-compatibility block: the first `mc:Choice`, else `mc:Fallback`.
fn alternate_branch(el: &XmlElement) -> Option<&XmlElement> {
    el.child("Choice").or_else(|| el.child("Fallback"))
}

/// Boolean toggle property: present means on unless explicitly switched off.
fn on_off(el: &XmlElement) -> bool {
    !matches!(el.attr("val"), Some("false" | "0" | "off"))
}

fn apply_run_properties(rpr: &XmlElement, props: &mut ElementProperties) {
    for prop in rpr.elements() {
        match prop.local_name() {
            "b" => props.bold = on_off(prop),
            "i" => props.italic = on_off(prop),
            "u" => props.underline = !matches!(prop.attr("val"), Some("none")),
            "strike" | "dstrike" => props.strike = true,
            "highlight" => {
                props.highlight = Some(prop.attr("val").unwrap_or("yellow").to_string());
            },
            "color" => props.color = prop.attr("val").map(str::to_string),
            "vertAlign" => match prop.attr("val") {
                Some("superscript") => {
                    props.superscript = true;
                    props.subscript = false;
                },
                Some("subscript") => {
                    props.subscript = true;
                    props.superscript = false;
                },
                _ => {},
            },
            _ => {},
        }
    }
}

/// First embedded image reference below a drawing or VML picture.
fn find_image_reference(el: &XmlElement) -> Option<&str> {
    if let Some(blip) = el.find_descendant("blip")
        && let Some(embed) = blip.attr("embed")
    {
        return Some(embed);
    }
    el.find_descendant("imagedata").and_then(|data| data.attr("id"))
}

/// `w:sym/@w:char` is a hexadecimal code point.
fn symbol_char(code: &str) -> Option<char> {
    u32::from_str_radix(code, 16).ok().and_then(char::from_u32)
}
