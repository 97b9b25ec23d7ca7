use crate::common::xml::local_name;
use smallvec::SmallVec;

/// Element kinds in OMML
///
/// Both the prefixed (`m:num`) and the unprefixed (`num`) spelling of a tag
/// map to the same kind, so synthesis only ever checks the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathKind {
    Math,
    MathPara,
    Run,
    Text,
    Fraction,
    Numerator,
    Denominator,
    Radical,
    Degree,
    /// Base slot (`m:e`)
    Element,
    Superscript,
    Subscript,
    SuperscriptContainer,
    SubscriptContainer,
    SubSupContainer,
    Nary,
    NaryProps,
    LimitLow,
    LimitUpper,
    Limit,
    Matrix,
    MatrixRow,
    Delimiter,
    DelimiterProps,
    BeginChar,
    EndChar,
    Function,
    FunctionName,
    EquationArray,
    Accent,
    AccentProps,
    Character,
    Bar,
    Box,
    GroupChar,
    GroupCharProps,
    BorderBox,
    PreSubSup,
    ControlProps,
    RunProps,
    /// Any other `*Pr` property container
    Properties,
    /// Unrecognized tag; children are still rendered
    Unknown,
}

impl MathKind {
    /// Property bags render to nothing; their owner reads them directly.
    pub fn is_property(self) -> bool {
        matches!(
            self,
            MathKind::NaryProps
                | MathKind::DelimiterProps
                | MathKind::AccentProps
                | MathKind::GroupCharProps
                | MathKind::ControlProps
                | MathKind::RunProps
                | MathKind::Properties
                | MathKind::BeginChar
                | MathKind::EndChar
                | MathKind::Character
        )
    }
}

/// Attribute list keyed by local name.
pub type MathAttributes = SmallVec<[(String, String); 2]>;

/// A node of the math tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MathNode {
    pub kind: MathKind,
    /// Text of a leaf element
    pub text: Option<String>,
    pub children: Vec<MathNode>,
    pub attributes: MathAttributes,
}

impl MathNode {
    pub fn new(kind: MathKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
            attributes: MathAttributes::new(),
        }
    }

    /// Empty root for payloads that could not be read.
    pub fn unknown() -> Self {
        Self::new(MathKind::Unknown)
    }

    /// A text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new(MathKind::Text)
        }
    }

    pub fn with_children(mut self, children: Vec<MathNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((local_name(key).to_string(), value.into()));
        self
    }

    /// Attribute by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: MathKind) -> Option<&MathNode> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// All direct children of the given kind.
    pub fn children_of(&self, kind: MathKind) -> impl Iterator<Item = &MathNode> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Value of a `m:val` attribute on a child marker, e.g. `m:chr`.
    pub fn marker_value(&self, kind: MathKind) -> Option<&str> {
        self.child(kind).and_then(|marker| marker.attr("val"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_keys_are_local() {
        let node = MathNode::new(MathKind::Character).with_attr("m:val", "∑");
        assert_eq!(node.attr("val"), Some("∑"));
        assert_eq!(node.attr("m:val"), None);
    }

    #[test]
    fn test_property_kinds() {
        assert!(MathKind::NaryProps.is_property());
        assert!(MathKind::Properties.is_property());
        assert!(!MathKind::Unknown.is_property());
        assert!(!MathKind::Element.is_property());
    }
}
