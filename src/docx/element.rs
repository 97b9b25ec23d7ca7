//! Typed structural element tree produced by the parser.
use crate::common::xml::XmlElement;

/// The closed set of structural element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Plain body paragraph
    Paragraph,
    /// Paragraph whose style names a heading level
    Heading,
    /// Paragraph carrying numbering properties
    ListItem,
    /// Formatted text run
    Run,
    /// Literal text
    Text,
    /// Explicit line break
    Break,
    /// Tab character
    Tab,
    /// Hyperlink wrapping runs
    Hyperlink,
    /// Embedded picture reference
    Image,
    /// Math payload (inline or display)
    Formula,
    /// Table
    Table,
    /// Table row
    TableRow,
    /// Table cell
    TableCell,
    /// Unrecognized inline wrapper; its children are still rendered
    Unknown,
}

/// Deepest list level WordprocessingML defines (`w:ilvl` 0 to 8).
pub const MAX_LIST_LEVEL: u32 = 8;

/// Widest table Word lays out, in grid columns.
pub const MAX_GRID_SPAN: u32 = 63;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Map a `w:jc` value. Unknown values yield `None`.
    pub fn from_jc(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" | "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Numbering reference of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRef {
    /// Numbering instance id (`w:numId`)
    pub num_id: u32,
    /// Nesting level (`w:ilvl`), 0-based
    pub level: u32,
}

impl ListRef {
    /// Nesting level limited to [`MAX_LIST_LEVEL`].
    #[inline]
    pub fn depth(&self) -> u32 {
        self.level.min(MAX_LIST_LEVEL)
    }
}

/// Property bag attached to every structural element.
///
/// Only the fields meaningful for the element's kind are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementProperties {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
    /// Highlight colour name; presence means highlighted
    pub highlight: Option<String>,
    /// Text colour as written (`FF0000`, `auto`)
    pub color: Option<String>,
    /// Paragraph style id (`w:pStyle`)
    pub style_id: Option<String>,
    /// Heading level derived from the style, unclamped
    pub heading_level: Option<u8>,
    pub list: Option<ListRef>,
    pub alignment: Option<Alignment>,
    /// Relationship id of a hyperlink target
    pub link_id: Option<String>,
    /// In-document bookmark anchor of a hyperlink
    pub anchor: Option<String>,
    /// Relationship id of an embedded image
    pub image_id: Option<String>,
    /// Verbatim math subtree
    pub math: Option<XmlElement>,
    /// Math comes from a display paragraph (`m:oMathPara`)
    pub display: bool,
    /// `w:gridSpan`
    pub grid_span: Option<u32>,
    /// `Some(1)` when the cell starts a vertical merge
    pub row_span: Option<u32>,
}

impl ElementProperties {
    /// Number of grid columns a cell occupies, between one and [`MAX_GRID_SPAN`].
    #[inline]
    pub fn colspan(&self) -> usize {
        self.grid_span.unwrap_or(1).clamp(1, MAX_GRID_SPAN) as usize
    }

    /// True when the run carries highlighting.
    #[inline]
    pub fn highlighted(&self) -> bool {
        self.highlight.is_some()
    }
}

/// A node of the structural tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxElement {
    pub kind: ElementKind,
    pub text: Option<String>,
    pub children: Vec<DocxElement>,
    pub props: ElementProperties,
}

impl DocxElement {
    /// Create an element of the given kind with no content.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
            props: ElementProperties::default(),
        }
    }

    /// Create a text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new(ElementKind::Text)
        }
    }

    pub fn with_children(mut self, children: Vec<DocxElement>) -> Self {
        self.children = children;
        self
    }

    pub fn with_props(mut self, props: ElementProperties) -> Self {
        self.props = props;
        self
    }

    #[inline]
    pub fn is_list_item(&self) -> bool {
        self.kind == ElementKind::ListItem
    }

    /// Concatenated literal text below this element, ignoring formatting.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.kind {
            ElementKind::Text => {
                if let Some(text) = &self.text {
                    out.push_str(text);
                }
            },
            ElementKind::Break => out.push('\n'),
            ElementKind::Tab => out.push('\t'),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            },
        }
    }
}
