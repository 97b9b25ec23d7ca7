//! Owned, order-preserving XML element tree.
//!
//! The structural parser and the math builder both walk the same node shape,
//! so the document is materialized once from quick-xml events. Comments,
//! processing instructions and declarations are dropped. Entity and character
//! references are resolved. Whitespace-only text is kept and left for the
//! consumer to ignore.
//!
//! Nesting is capped at [`MAX_NESTING_DEPTH`]. Deeper subtrees are skipped so
//! that every recursive walk over the tree (clone, drop, descendant lookups,
//! math building) stays within a fixed stack budget.
use crate::common::error::{Error, Result};
use log::warn;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// Deepest element kept by [`parse_xml`]; the root is at depth 1.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Attribute list. Most WordprocessingML elements carry one or two.
pub type Attributes = SmallVec<[(String, String); 4]>;

/// A node in the generic XML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// An element with its qualified name, attributes and children
    Element(XmlElement),
    /// Character data with references already resolved
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name as written in the source (e.g. `w:p`)
    pub name: String,
    /// Attributes in document order, keys as written (e.g. `w:val`)
    pub attributes: Attributes,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

/// Strip the namespace prefix from a qualified name.
#[inline]
pub fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

impl XmlElement {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Builder helper: add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder helper: append a child node.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Local part of the element name.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Look up an attribute by local name, so `w:val` and `val` both match `"val"`.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.local_name() == local)
    }

    /// All direct child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |el| el.local_name() == local)
    }

    /// Depth-first, document-order search below this element.
    ///
    /// The element itself is not considered. The first match wins.
    pub fn find_descendant(&self, local: &str) -> Option<&XmlElement> {
        for el in self.elements() {
            if el.local_name() == local {
                return Some(el);
            }
            if let Some(found) = el.find_descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }

    /// True when the element has no element children.
    pub fn is_leaf(&self) -> bool {
        self.elements().next().is_none()
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // References arrive as separate events; merge them into the preceding run.
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut attributes = Attributes::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            attributes.push((key, unescape(raw)?.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }
}

/// Parse an XML document into its root element.
///
/// Unbalanced or unclosed tags, invalid UTF-8 and input without a root
/// element are errors.
pub fn parse_xml(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::with_capacity(32);
    let mut root: Option<XmlElement> = None;
    // Open elements below the depth cap; their content is discarded.
    let mut skipped: usize = 0;

    loop {
        match reader.read_event()? {
            Event::Start(_) if stack.len() >= MAX_NESTING_DEPTH => {
                if skipped == 0 {
                    warn_truncated(&stack);
                }
                skipped += 1;
            },
            Event::Empty(_) if stack.len() >= MAX_NESTING_DEPTH => {
                if skipped == 0 {
                    warn_truncated(&stack);
                }
            },
            Event::Start(e) => stack.push(XmlElement::from_start(&e)?),
            Event::Empty(e) => {
                let element = XmlElement::from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            },
            Event::End(_) if skipped > 0 => skipped -= 1,
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if skipped > 0 => {},
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            },
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = std::str::from_utf8(e.as_ref())?;
                    parent.push_text(&unescape(raw)?);
                }
            },
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(std::str::from_utf8(e.as_ref())?);
                }
            },
            Event::GeneralRef(e) => {
                if let Some(parent) = stack.last_mut() {
                    let name = std::str::from_utf8(e.as_ref())?;
                    let reference = format!("&{};", name);
                    // Undeclared entities are kept literally.
                    match unescape(&reference) {
                        Ok(resolved) => parent.push_text(&resolved),
                        Err(_) => parent.push_text(&reference),
                    }
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::Xml("document has no root element".to_string()))
}

fn warn_truncated(stack: &[XmlElement]) {
    if let Some(parent) = stack.last() {
        warn!(
            "XML nesting deeper than {} levels below <{}> was dropped",
            MAX_NESTING_DEPTH, parent.name
        );
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        },
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        },
        None => Err(Error::Xml(format!(
            "multiple root elements (found <{}>)",
            element.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_whitespace() {
        let root = parse_xml(r#"<w:r xmlns:w="ns"><w:t xml:space="preserve"> a </w:t><w:br/></w:r>"#)
            .unwrap();
        assert_eq!(root.name, "w:r");
        assert_eq!(root.local_name(), "r");
        let names: Vec<&str> = root.elements().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["t", "br"]);
        assert_eq!(root.child("t").unwrap().text_content(), " a ");
    }

    #[test]
    fn test_attr_lookup_by_local_name() {
        let root = parse_xml(r#"<w:pStyle w:val="Heading1"/>"#).unwrap();
        assert_eq!(root.attr("val"), Some("Heading1"));
        assert_eq!(root.attr("missing"), None);
    }

    #[test]
    fn test_entities_resolved() {
        let root = parse_xml(r#"<t a="x &amp; y">1 &lt; 2 &#945;</t>"#).unwrap();
        assert_eq!(root.attr("a"), Some("x & y"));
        assert_eq!(root.text_content(), "1 < 2 α");
        // Reference events merge into one text node
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_find_descendant_document_order() {
        let root = parse_xml(
            r#"<drawing><inline><graphic><blip embed="rId1"/></graphic></inline><blip embed="rId2"/></drawing>"#,
        )
        .unwrap();
        assert_eq!(root.find_descendant("blip").unwrap().attr("embed"), Some("rId1"));
        assert!(root.find_descendant("drawing").is_none());
    }

    #[test]
    fn test_deep_nesting_is_capped() {
        let depth = 10_000;
        let xml = format!("{}<t>x</t>{}", "<e>".repeat(depth), "</e>".repeat(depth));
        let root = parse_xml(&xml).unwrap();

        let mut levels = 1;
        let mut current = &root;
        while let Some(child) = current.elements().next() {
            levels += 1;
            current = child;
        }
        assert_eq!(levels, MAX_NESTING_DEPTH);
        assert!(current.is_leaf());

        // Skipped subtrees are still checked for balance.
        let unbalanced = format!("{}</f>", "<e>".repeat(depth));
        assert!(parse_xml(&unbalanced).is_err());
    }

    #[test]
    fn test_malformed_input_is_error() {
        assert!(parse_xml("<a><b></a>").is_err());
        assert!(parse_xml("<a>").is_err());
        assert!(parse_xml("").is_err());
        assert!(parse_xml("<a/><b/>").is_err());
    }

    #[test]
    fn test_comments_and_declaration_dropped() {
        let root = parse_xml("<?xml version=\"1.0\"?><!-- c --><a><!-- inner --><b/></a>").unwrap();
        assert_eq!(root.children.len(), 1);
        assert!(root.child("b").unwrap().is_leaf());
    }

    #[test]
    fn test_cdata_kept() {
        let root = parse_xml("<a><![CDATA[x<y]]></a>").unwrap();
        assert_eq!(root.text_content(), "x<y");
    }
}
