// Formula Module - OMML to LaTeX
//
// Math payloads captured by the structural parser go through two stages:
//
// - **omml**: classify the raw XML into a typed math tree
// - **latex**: synthesize a LaTeX string from that tree
//
// # Example
//
// ```
// use docx_md::formula::omml_to_latex;
//
// let latex = omml_to_latex("<m:oMath><m:r><m:t>α+1</m:t></m:r></m:oMath>");
// assert_eq!(latex, "\\alpha + 1");
// ```

/// LaTeX synthesis
pub mod latex;
/// OMML (Office Math Markup Language) tree building
pub mod omml;

pub use latex::{FormulaSynthesizer, LatexError};
pub use omml::{MathKind, MathNode, MathTreeBuilder};

use log::warn;

/// Text rendered in place of a formula that could not be converted.
pub const FORMULA_ERROR_PLACEHOLDER: &str = "[Formula conversion error]";

/// Convert raw OMML to LaTeX.
///
/// Never fails: an unreadable payload renders as empty, a synthesis failure
/// as [`FORMULA_ERROR_PLACEHOLDER`].
pub fn omml_to_latex(omml: &str) -> String {
    let root = MathTreeBuilder::new().parse(omml);
    match FormulaSynthesizer::new().synthesize(&root) {
        Ok(latex) => latex,
        Err(err) => {
            warn!("formula conversion failed: {}", err);
            FORMULA_ERROR_PLACEHOLDER.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omml_to_latex() {
        let omml = r#"<m:oMath xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math"><m:r><m:t>x</m:t></m:r></m:oMath>"#;
        assert_eq!(omml_to_latex(omml), "x");
    }

    #[test]
    fn test_malformed_payload_is_empty() {
        assert_eq!(omml_to_latex("<m:oMath>"), "");
    }
}
