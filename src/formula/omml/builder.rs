//! Builds a [`MathNode`] tree from an OMML payload.
use super::elements::{MathKind, MathNode};
use super::lookup::kind_for_tag;
use crate::common::xml::{XmlElement, XmlNode, local_name, parse_xml};
use crate::formula::latex::DEFAULT_MAX_DEPTH;
use log::debug;

/// Deepest node the builder materializes. One level past the synthesizer's
/// limit, so over-deep formulas still fail synthesis instead of rendering
/// truncated.
pub const MAX_TREE_DEPTH: usize = DEFAULT_MAX_DEPTH + 2;

/// Recursive-descent builder over the generic XML tree.
///
/// Never fails: unreadable payloads produce an empty [`MathKind::Unknown`]
/// root, and unrecognized tags become `Unknown` nodes that keep their
/// children. Subtrees nested deeper than [`MAX_TREE_DEPTH`] collapse to an
/// empty `Unknown` leaf.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathTreeBuilder;

impl MathTreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build from raw OMML text.
    pub fn parse(&self, xml: &str) -> MathNode {
        match parse_xml(xml) {
            Ok(root) => self.build(&root),
            Err(err) => {
                debug!("unreadable math payload: {}", err);
                MathNode::unknown()
            },
        }
    }

    /// Build from an already parsed element.
    pub fn build(&self, el: &XmlElement) -> MathNode {
        self.build_at(el, 1)
    }

    fn build_at(&self, el: &XmlElement, depth: usize) -> MathNode {
        if depth > MAX_TREE_DEPTH {
            debug!("math subtree below <{}> too deep", el.name);
            return MathNode::unknown();
        }
        let kind = kind_for_tag(&el.name);
        let mut node = MathNode::new(kind);
        node.attributes = el
            .attributes
            .iter()
            .map(|(key, value)| (local_name(key).to_string(), value.clone()))
            .collect();

        let keep_whitespace = kind == MathKind::Text;
        let mut texts: Vec<&str> = Vec::new();
        let mut has_elements = false;
        for child in &el.children {
            match child {
                XmlNode::Element(_) => has_elements = true,
                XmlNode::Text(text) if keep_whitespace || !text.trim().is_empty() => {
                    texts.push(text)
                },
                XmlNode::Text(_) => {},
            }
        }

        if !has_elements {
            if !texts.is_empty() {
                node.text = Some(texts.concat());
            }
            return node;
        }

        // Mixed content keeps text segments as leaves in document order.
        for child in &el.children {
            match child {
                XmlNode::Element(child_el) => node.children.push(self.build_at(child_el, depth + 1)),
                XmlNode::Text(text) if keep_whitespace || !text.trim().is_empty() => {
                    node.children.push(MathNode::text(text.clone()))
                },
                XmlNode::Text(_) => {},
            }
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::latex::FormulaSynthesizer;

    #[test]
    fn test_build_fraction() {
        let root = MathTreeBuilder::new().parse(
            r#"<m:oMath xmlns:m="m">
                <m:f><m:num><m:r><m:t>a</m:t></m:r></m:num><m:den><m:r><m:t>b</m:t></m:r></m:den></m:f>
            </m:oMath>"#,
        );
        assert_eq!(root.kind, MathKind::Math);
        assert_eq!(root.children.len(), 1);
        let fraction = &root.children[0];
        assert_eq!(fraction.kind, MathKind::Fraction);
        let num = fraction.child(MathKind::Numerator).unwrap();
        let text = &num.children[0].children[0];
        assert_eq!(text.kind, MathKind::Text);
        assert_eq!(text.text.as_deref(), Some("a"));
    }

    #[test]
    fn test_unprefixed_tags_normalize() {
        let root = MathTreeBuilder::new().parse("<oMath><f><num/><den/></f></oMath>");
        let fraction = &root.children[0];
        assert!(fraction.child(MathKind::Numerator).is_some());
        assert!(fraction.child(MathKind::Denominator).is_some());
    }

    #[test]
    fn test_text_whitespace_verbatim() {
        let root = MathTreeBuilder::new().parse(r#"<m:r><m:t xml:space="preserve"> x </m:t></m:r>"#);
        assert_eq!(root.children[0].text.as_deref(), Some(" x "));
    }

    #[test]
    fn test_attributes_local_names() {
        let root = MathTreeBuilder::new()
            .parse(r#"<m:naryPr xmlns:m="m"><m:chr m:val="∑"/></m:naryPr>"#);
        assert_eq!(root.kind, MathKind::NaryProps);
        assert_eq!(root.marker_value(MathKind::Character), Some("∑"));
    }

    #[test]
    fn test_unknown_tag_keeps_children() {
        let root = MathTreeBuilder::new()
            .parse("<m:oMath><m:phant><m:e><m:r><m:t>z</m:t></m:r></m:e></m:phant></m:oMath>");
        let unknown = &root.children[0];
        assert_eq!(unknown.kind, MathKind::Unknown);
        assert_eq!(unknown.children[0].kind, MathKind::Element);
    }

    #[test]
    fn test_deep_tree_is_cut_off() {
        let mut el = XmlElement {
            name: "m:r".to_string(),
            ..Default::default()
        };
        for _ in 0..MAX_TREE_DEPTH + 10 {
            el = XmlElement {
                name: "m:e".to_string(),
                children: vec![XmlNode::Element(el)],
                ..Default::default()
            };
        }

        let root = MathTreeBuilder::new().build(&el);
        let mut levels = 1;
        let mut current = &root;
        while let Some(child) = current.children.first() {
            levels += 1;
            current = child;
        }
        assert_eq!(levels, MAX_TREE_DEPTH + 1);
        assert!(FormulaSynthesizer::new().synthesize(&root).is_err());
        assert_eq!(*current, MathNode::unknown());
    }

    #[test]
    fn test_malformed_payload_yields_unknown_root() {
        let root = MathTreeBuilder::new().parse("<m:oMath><m:f>");
        assert_eq!(root, MathNode::unknown());
    }
}
