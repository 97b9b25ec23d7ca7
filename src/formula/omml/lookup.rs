use super::elements::MathKind;
use phf::phf_map;

/// Fast local element name to kind lookup using PHF
///
/// Keys are local names; the prefix is stripped before lookup so `m:f` and
/// `f` resolve alike.
pub static ELEMENT_KINDS: phf::Map<&'static str, MathKind> = phf_map! {
    // Containers
    "oMath" => MathKind::Math,
    "oMathPara" => MathKind::MathPara,

    // Text and runs
    "r" => MathKind::Run,
    "t" => MathKind::Text,

    // Fractions
    "f" => MathKind::Fraction,
    "num" => MathKind::Numerator,
    "den" => MathKind::Denominator,

    // Radicals
    "rad" => MathKind::Radical,
    "deg" => MathKind::Degree,

    // Base slot
    "e" => MathKind::Element,

    // Scripts
    "sup" => MathKind::Superscript,
    "sub" => MathKind::Subscript,
    "sSup" => MathKind::SuperscriptContainer,
    "sSub" => MathKind::SubscriptContainer,
    "sSubSup" => MathKind::SubSupContainer,
    "sPre" => MathKind::PreSubSup,

    // N-ary operators and limits
    "nary" => MathKind::Nary,
    "naryPr" => MathKind::NaryProps,
    "limLow" => MathKind::LimitLow,
    "limUpp" => MathKind::LimitUpper,
    "lim" => MathKind::Limit,

    // Matrices
    "m" => MathKind::Matrix,
    "mr" => MathKind::MatrixRow,

    // Delimiters
    "d" => MathKind::Delimiter,
    "dPr" => MathKind::DelimiterProps,
    "begChr" => MathKind::BeginChar,
    "endChr" => MathKind::EndChar,

    // Functions
    "func" => MathKind::Function,
    "fName" => MathKind::FunctionName,

    // Equation arrays
    "eqArr" => MathKind::EquationArray,

    // Accents and decorations
    "acc" => MathKind::Accent,
    "accPr" => MathKind::AccentProps,
    "chr" => MathKind::Character,
    "bar" => MathKind::Bar,
    "box" => MathKind::Box,
    "groupChr" => MathKind::GroupChar,
    "groupChrPr" => MathKind::GroupCharProps,
    "borderBox" => MathKind::BorderBox,

    // Property containers
    "ctrlPr" => MathKind::ControlProps,
    "rPr" => MathKind::RunProps,
    "fPr" => MathKind::Properties,
    "radPr" => MathKind::Properties,
    "sSupPr" => MathKind::Properties,
    "sSubPr" => MathKind::Properties,
    "sSubSupPr" => MathKind::Properties,
    "sPrePr" => MathKind::Properties,
    "funcPr" => MathKind::Properties,
    "limLowPr" => MathKind::Properties,
    "limUppPr" => MathKind::Properties,
    "mPr" => MathKind::Properties,
    "mcs" => MathKind::Properties,
    "mc" => MathKind::Properties,
    "mcPr" => MathKind::Properties,
    "eqArrPr" => MathKind::Properties,
    "barPr" => MathKind::Properties,
    "boxPr" => MathKind::Properties,
    "borderBoxPr" => MathKind::Properties,
    "oMathParaPr" => MathKind::Properties,
};

/// Kind for a (possibly prefixed) tag name.
#[inline]
pub fn kind_for_tag(tag: &str) -> MathKind {
    ELEMENT_KINDS
        .get(crate::common::xml::local_name(tag))
        .copied()
        .unwrap_or(MathKind::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_and_bare_tags_agree() {
        assert_eq!(kind_for_tag("m:num"), MathKind::Numerator);
        assert_eq!(kind_for_tag("num"), MathKind::Numerator);
        assert_eq!(kind_for_tag("m:sSubSup"), MathKind::SubSupContainer);
        assert_eq!(kind_for_tag("m:mPr"), MathKind::Properties);
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(kind_for_tag("m:phant"), MathKind::Unknown);
        assert_eq!(kind_for_tag("w:r"), MathKind::Run);
    }
}
