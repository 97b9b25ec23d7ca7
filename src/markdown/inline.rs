//! Inline synthesis: runs, hyperlinks, images and formulas.
//!
//! Run formatting wraps the trimmed run text, innermost first:
//! strikethrough, bold/italic, highlight, super/subscript, underline.
//! Whitespace around the text stays outside every wrapper.
use super::config::ConversionOptions;
use super::context::ConversionContext;
use crate::docx::element::{DocxElement, ElementKind, ElementProperties};
use crate::formula::{FORMULA_ERROR_PLACEHOLDER, FormulaSynthesizer, MathTreeBuilder};

/// Text rendered for an image that could not be resolved or stored.
pub const IMAGE_PLACEHOLDER: &str = "[Image]";

const TAB: &str = "    ";

/// Render a sequence of inline elements.
pub fn render_inlines(ctx: &mut ConversionContext<'_>, elements: &[DocxElement]) -> String {
    let mut out = String::new();
    for element in elements {
        render_inline(ctx, element, &mut out);
    }
    out
}

/// Render one inline element into `out`.
pub fn render_inline(ctx: &mut ConversionContext<'_>, element: &DocxElement, out: &mut String) {
    match element.kind {
        ElementKind::Run => out.push_str(&render_run(ctx, element)),
        ElementKind::Hyperlink => out.push_str(&render_hyperlink(ctx, element)),
        ElementKind::Formula => out.push_str(&render_formula(ctx, element)),
        ElementKind::Image => out.push_str(&render_image(ctx, element)),
        ElementKind::Text => {
            if let Some(text) = &element.text {
                out.push_str(text);
            }
        },
        ElementKind::Break => out.push_str(line_break(ctx.options)),
        ElementKind::Tab => out.push_str(TAB),
        _ => {
            for child in &element.children {
                render_inline(ctx, child, out);
            }
        },
    }
}

/// Render a run: its content first, then the run's formatting around it.
pub fn render_run(ctx: &mut ConversionContext<'_>, run: &DocxElement) -> String {
    let mut text = String::new();
    for child in &run.children {
        render_inline(ctx, child, &mut text);
    }
    apply_formatting(&text, &run.props)
}

/// Wrap `text` in the Markdown markers of `props`.
///
/// Whitespace-only text is returned untouched.
pub fn apply_formatting(text: &str, props: &ElementProperties) -> String {
    let content = text.trim();
    if content.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];

    let mut content = content.to_string();
    if props.strike {
        content = format!("~~{}~~", content);
    }
    if props.bold && props.italic {
        content = format!("***{}***", content);
    } else if props.bold {
        content = format!("**{}**", content);
    } else if props.italic {
        content = format!("*{}*", content);
    }
    if props.highlighted() {
        content = format!("=={}==", content);
    }
    if props.superscript {
        content = format!("<sup>{}</sup>", content);
    }
    if props.subscript {
        content = format!("<sub>{}</sub>", content);
    }
    if props.underline {
        content = format!("<u>{}</u>", content);
    }

    let mut out = String::with_capacity(leading.len() + content.len() + trailing.len());
    out.push_str(leading);
    out.push_str(&content);
    out.push_str(trailing);
    out
}

/// Render a hyperlink. Internal targets become wiki links.
pub fn render_hyperlink(ctx: &mut ConversionContext<'_>, link: &DocxElement) -> String {
    let target = ctx.hyperlink_target(&link.props);
    let text = link.plain_text();
    match target.strip_prefix('#') {
        Some(anchor) if !anchor.is_empty() => format!("[[{}|{}]]", anchor, text),
        _ => format!("[{}]({})", text, target),
    }
}

/// Render a math payload with the configured delimiters.
///
/// A synthesis failure renders the fixed placeholder and records a warning.
pub fn render_formula(ctx: &mut ConversionContext<'_>, formula: &DocxElement) -> String {
    let Some(math) = &formula.props.math else {
        return String::new();
    };
    let root = MathTreeBuilder::new().build(math);
    match FormulaSynthesizer::new().synthesize(&root) {
        Ok(latex) if latex.is_empty() => String::new(),
        Ok(latex) => ctx.options.formula_style.wrap(&latex, formula.props.display),
        Err(err) => {
            ctx.warn(format!("Failed to convert formula: {}", err));
            FORMULA_ERROR_PLACEHOLDER.to_string()
        },
    }
}

/// Render an image reference, storing its bytes through the sink.
pub fn render_image(ctx: &mut ConversionContext<'_>, image: &DocxElement) -> String {
    let Some(image_id) = image.props.image_id.as_deref() else {
        return String::new();
    };
    match ctx.store_image(image_id) {
        Some(name) => image_link(ctx.options, &name),
        None => IMAGE_PLACEHOLDER.to_string(),
    }
}

/// Wiki-style embed for a stored image.
pub fn image_link(options: &ConversionOptions, file_name: &str) -> String {
    if options.use_relative_image_paths || options.image_folder.is_empty() {
        format!("![[{}]]", file_name)
    } else {
        format!(
            "![[{}/{}]]",
            options.image_folder.trim_end_matches('/'),
            file_name
        )
    }
}

#[inline]
fn line_break(options: &ConversionOptions) -> &'static str {
    if options.preserve_line_breaks { "\n" } else { " " }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_xml;
    use crate::markdown::config::FormulaStyle;
    use crate::docx::package::{DOCUMENT_PART, DocumentPackage, RELATIONSHIPS_PART};
    use crate::images::CollectingImageSink;
    use std::collections::HashMap;

    fn run(text: &str, props: ElementProperties) -> DocxElement {
        DocxElement::new(ElementKind::Run)
            .with_children(vec![DocxElement::text(text)])
            .with_props(props)
    }

    fn render_with(
        options: &ConversionOptions,
        package: &DocumentPackage,
        source: &HashMap<String, Vec<u8>>,
        elements: &[DocxElement],
    ) -> (String, Vec<String>) {
        let mut sink = CollectingImageSink::new();
        let mut ctx = ConversionContext::new(options, package, source, &mut sink);
        let out = render_inlines(&mut ctx, elements);
        (out, ctx.into_warnings())
    }

    fn render(elements: &[DocxElement]) -> String {
        render_with(
            &ConversionOptions::default(),
            &DocumentPackage::default(),
            &HashMap::new(),
            elements,
        )
        .0
    }

    #[test]
    fn test_formatting_nesting_order() {
        let props = ElementProperties {
            bold: true,
            italic: true,
            strike: true,
            highlight: Some("yellow".to_string()),
            superscript: true,
            underline: true,
            ..Default::default()
        };
        assert_eq!(
            apply_formatting(" x ", &props),
            " <u><sup>==***~~x~~***==</sup></u> "
        );
    }

    #[test]
    fn test_whitespace_only_run_is_not_wrapped() {
        let props = ElementProperties {
            bold: true,
            ..Default::default()
        };
        assert_eq!(apply_formatting("   ", &props), "   ");
        assert_eq!(apply_formatting("", &props), "");
    }

    #[test]
    fn test_bold_and_italic_runs() {
        let bold = ElementProperties {
            bold: true,
            ..Default::default()
        };
        let italic = ElementProperties {
            italic: true,
            ..Default::default()
        };
        let out = render(&[run("Hello ", bold), run("world", italic)]);
        assert_eq!(out, "**Hello** *world*");
    }

    #[test]
    fn test_breaks_and_tabs() {
        let content = DocxElement::new(ElementKind::Run).with_children(vec![
            DocxElement::text("a"),
            DocxElement::new(ElementKind::Tab),
            DocxElement::text("b"),
            DocxElement::new(ElementKind::Break),
            DocxElement::text("c"),
        ]);
        assert_eq!(render(std::slice::from_ref(&content)), "a    b\nc");

        let options = ConversionOptions::new().with_line_breaks(false);
        let (out, _) = render_with(
            &options,
            &DocumentPackage::default(),
            &HashMap::new(),
            &[content],
        );
        assert_eq!(out, "a    b c");
    }

    #[test]
    fn test_hyperlinks() {
        let mut source = HashMap::new();
        source.insert(DOCUMENT_PART.to_string(), b"<w:document/>".to_vec());
        source.insert(
            RELATIONSHIPS_PART.to_string(),
            br#"<Relationships><Relationship Id="rId9" Type="t/hyperlink" Target="https://example.com" TargetMode="External"/></Relationships>"#.to_vec(),
        );
        let package = DocumentPackage::load(&source).unwrap();

        let link = |link_id: Option<&str>, anchor: Option<&str>| {
            DocxElement::new(ElementKind::Hyperlink)
                .with_children(vec![run("Site", ElementProperties::default())])
                .with_props(ElementProperties {
                    link_id: link_id.map(str::to_string),
                    anchor: anchor.map(str::to_string),
                    ..Default::default()
                })
        };
        let elements = vec![
            link(Some("rId9"), None),
            DocxElement::text(" "),
            link(None, Some("intro")),
            DocxElement::text(" "),
            link(Some("rId1"), None),
        ];
        let (out, warnings) =
            render_with(&ConversionOptions::default(), &package, &source, &elements);
        assert_eq!(out, "[Site](https://example.com) [[intro|Site]] [Site](#)");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_formula_styles() {
        let math = parse_xml("<m:oMath><m:r><m:t>x</m:t></m:r></m:oMath>").unwrap();
        let inline = DocxElement::new(ElementKind::Formula).with_props(ElementProperties {
            math: Some(math.clone()),
            ..Default::default()
        });
        let display = DocxElement::new(ElementKind::Formula).with_props(ElementProperties {
            math: Some(math),
            display: true,
            ..Default::default()
        });
        assert_eq!(render(std::slice::from_ref(&inline)), "$x$");
        assert_eq!(render(std::slice::from_ref(&display)), "$$\nx\n$$");

        let options = ConversionOptions::new().with_formula_style(FormulaStyle::LaTeX);
        let (out, _) = render_with(
            &options,
            &DocumentPackage::default(),
            &HashMap::new(),
            &[inline, display],
        );
        assert_eq!(out, "\\(x\\)\\[\nx\n\\]");
    }

    #[test]
    fn test_images() {
        let mut source = HashMap::new();
        source.insert(DOCUMENT_PART.to_string(), b"<w:document/>".to_vec());
        source.insert(
            RELATIONSHIPS_PART.to_string(),
            br#"<Relationships><Relationship Id="rId5" Type="t/image" Target="media/image1.png"/><Relationship Id="rId6" Type="t/image" Target="media/gone.png"/></Relationships>"#.to_vec(),
        );
        source.insert("word/media/image1.png".to_string(), b"PNG".to_vec());
        let package = DocumentPackage::load(&source).unwrap();

        let image = |id: &str| {
            DocxElement::new(ElementKind::Image).with_props(ElementProperties {
                image_id: Some(id.to_string()),
                ..Default::default()
            })
        };
        let elements = vec![image("rId5"), image("rId6"), image("rId5")];

        let (out, _) = render_with(&ConversionOptions::default(), &package, &source, &elements);
        assert_eq!(out, "![[image1.png]][Image]![[image1.png]]");

        let options = ConversionOptions::new().with_relative_image_paths(false);
        let (out, _) = render_with(&options, &package, &source, &elements[..1]);
        assert_eq!(out, "![[attachments/image1.png]]");
    }

    #[test]
    fn test_image_link_forms() {
        let options = ConversionOptions::new()
            .with_image_folder("img/")
            .with_relative_image_paths(false);
        assert_eq!(image_link(&options, "a.png"), "![[img/a.png]]");
        let options = options.with_relative_image_paths(true);
        assert_eq!(image_link(&options, "a.png"), "![[a.png]]");
    }
}
