// Math tree to LaTeX synthesis
//
// One case per math kind. Structural kinds concatenate their children,
// property bags render to nothing and are read by their owning construct.

use super::cleanup::cleanup;
use super::error::LatexError;
use super::symbols::{accent_command, delimiter, function_command, nary_operator, unicode_to_latex};
use super::templates;
use crate::formula::omml::{MathKind, MathNode};

/// Default nesting limit; deeper trees fail with [`LatexError::DepthExceeded`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Stateless LaTeX synthesizer for [`MathNode`] trees.
#[derive(Debug, Clone, Copy)]
pub struct FormulaSynthesizer {
    max_depth: usize,
}

impl Default for FormulaSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// True when the string ends in a control word such as `\Delta`.
fn ends_with_command(s: &str) -> bool {
    let trimmed = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    trimmed.len() < s.len() && trimmed.ends_with('\\')
}

/// Append `part`, separating it from a trailing control word when it starts
/// with a letter or digit.
fn push_part(out: &mut String, part: &str) {
    if let Some(first) = part.chars().next()
        && is_alphanumeric(first)
        && ends_with_command(out)
    {
        out.push(' ');
    }
    out.push_str(part);
}

/// Render literal math text character by character.
pub fn render_text(text: &str) -> String {
    let normalized: Vec<char> = text
        .chars()
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in normalized.iter().enumerate() {
        let next = normalized.get(i + 1).copied();

        if let Some(command) = unicode_to_latex(c) {
            if out.chars().last().is_some_and(is_alphanumeric) {
                out.push(' ');
            }
            out.push_str(command);
            if next.is_some_and(is_alphanumeric) && !command.ends_with('}') {
                out.push(' ');
            }
        } else if c == ' ' {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('{') {
                out.push(' ');
            }
        } else if matches!(c, '+' | '-' | '=') {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(c);
            if next.is_some_and(|n| n != ' ') {
                out.push(' ');
            }
        } else {
            if is_alphanumeric(c) && ends_with_command(&out) {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}

impl FormulaSynthesizer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render a math tree and apply the final cleanup pass.
    pub fn synthesize(&self, root: &MathNode) -> Result<String, LatexError> {
        let raw = self.node(root, 0)?;
        Ok(cleanup(&raw))
    }

    fn node(&self, node: &MathNode, depth: usize) -> Result<String, LatexError> {
        if depth > self.max_depth {
            return Err(LatexError::DepthExceeded(depth));
        }
        let depth = depth + 1;

        match node.kind {
            MathKind::Text => Ok(self.text(node)),
            MathKind::Fraction => {
                let num = self.slot(node, MathKind::Numerator, depth)?;
                let den = self.slot(node, MathKind::Denominator, depth)?;
                Ok(templates::fraction(&num, &den))
            },
            MathKind::Radical => {
                let degree = match node.child(MathKind::Degree) {
                    Some(deg) => Some(self.children(deg, depth)?),
                    None => None,
                };
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::radical(degree.as_deref(), &base))
            },
            MathKind::SuperscriptContainer => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let sup = self.slot(node, MathKind::Superscript, depth)?;
                Ok(templates::superscript(&base, &sup))
            },
            MathKind::SubscriptContainer => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let sub = self.slot(node, MathKind::Subscript, depth)?;
                Ok(templates::subscript(&base, &sub))
            },
            MathKind::SubSupContainer => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let sub = self.slot(node, MathKind::Subscript, depth)?;
                let sup = self.slot(node, MathKind::Superscript, depth)?;
                Ok(templates::sub_superscript(&base, &sub, &sup))
            },
            MathKind::PreSubSup => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let sub = self.slot(node, MathKind::Subscript, depth)?;
                let sup = self.slot(node, MathKind::Superscript, depth)?;
                Ok(templates::pre_scripts(&base, &sub, &sup))
            },
            MathKind::Nary => {
                let chr = node
                    .child(MathKind::NaryProps)
                    .and_then(|props| props.marker_value(MathKind::Character));
                let sub = self.slot(node, MathKind::Subscript, depth)?;
                let sup = self.slot(node, MathKind::Superscript, depth)?;
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::nary(nary_operator(chr), &sub, &sup, &base))
            },
            MathKind::LimitLow => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let lim = self.slot(node, MathKind::Limit, depth)?;
                Ok(templates::subscript(&base, &lim))
            },
            MathKind::LimitUpper => {
                let base = self.slot(node, MathKind::Element, depth)?;
                let lim = self.slot(node, MathKind::Limit, depth)?;
                Ok(templates::superscript(&base, &lim))
            },
            MathKind::Matrix => {
                let mut rows = Vec::new();
                for row in node.children_of(MathKind::MatrixRow) {
                    let cells = row
                        .children_of(MathKind::Element)
                        .map(|cell| self.children(cell, depth))
                        .collect::<Result<Vec<_>, _>>()?;
                    rows.push(cells);
                }
                Ok(templates::matrix(&rows))
            },
            MathKind::Delimiter => {
                let props = node.child(MathKind::DelimiterProps);
                let begin = props
                    .and_then(|p| p.marker_value(MathKind::BeginChar))
                    .unwrap_or("(");
                let end = props
                    .and_then(|p| p.marker_value(MathKind::EndChar))
                    .unwrap_or(")");
                let operands = node
                    .children_of(MathKind::Element)
                    .map(|operand| self.children(operand, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(templates::delimited(delimiter(begin), delimiter(end), &operands))
            },
            MathKind::Function => {
                let name = self.slot(node, MathKind::FunctionName, depth)?;
                let name = name.trim();
                let argument = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::function(function_command(name), name, &argument))
            },
            MathKind::EquationArray => {
                let equations = node
                    .children_of(MathKind::Element)
                    .map(|eq| self.children(eq, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(templates::equation_array(&equations))
            },
            MathKind::Accent => {
                let chr = node
                    .child(MathKind::AccentProps)
                    .and_then(|props| props.marker_value(MathKind::Character));
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::command_group(accent_command(chr), &base))
            },
            MathKind::Bar => {
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::command_group("\\overline", &base))
            },
            MathKind::BorderBox => {
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::command_group("\\boxed", &base))
            },
            MathKind::GroupChar => {
                let chr = node
                    .child(MathKind::GroupCharProps)
                    .and_then(|props| props.marker_value(MathKind::Character));
                let base = self.slot(node, MathKind::Element, depth)?;
                Ok(templates::group_char(chr, &base))
            },
            kind if kind.is_property() => Ok(String::new()),
            // Math, MathPara, Run, Box, slots and unknown tags
            _ => self.children(node, depth),
        }
    }

    fn text(&self, node: &MathNode) -> String {
        let mut text = node.text.clone().unwrap_or_default();
        for child in &node.children {
            if let Some(child_text) = &child.text {
                text.push_str(child_text);
            }
        }
        render_text(&text)
    }

    /// Render the first child of the given kind, or nothing when absent.
    fn slot(&self, node: &MathNode, kind: MathKind, depth: usize) -> Result<String, LatexError> {
        match node.child(kind) {
            Some(slot) => self.children(slot, depth),
            None => Ok(String::new()),
        }
    }

    /// Render a node's own text, or its children joined with run-on protection.
    fn children(&self, node: &MathNode, depth: usize) -> Result<String, LatexError> {
        if let Some(text) = &node.text {
            return Ok(render_text(text));
        }
        let mut out = String::new();
        for child in &node.children {
            let part = self.node(child, depth)?;
            if !part.is_empty() {
                push_part(&mut out, &part);
            }
        }
        Ok(out)
    }
}
