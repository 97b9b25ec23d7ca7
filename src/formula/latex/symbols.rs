// Symbol conversion to LaTeX
//
// Static lookup tables for Unicode math characters, function names, accents,
// n-ary operators and delimiters.

use phf::phf_map;

// Unicode math characters that have a LaTeX command
static UNICODE_TO_LATEX: phf::Map<char, &'static str> = phf_map! {
    // Lowercase Greek
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'π' => "\\pi",
    'ρ' => "\\rho",
    'σ' => "\\sigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",

    // Uppercase Greek
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Θ' => "\\Theta",
    'Λ' => "\\Lambda",
    'Ξ' => "\\Xi",
    'Π' => "\\Pi",
    'Σ' => "\\Sigma",
    'Υ' => "\\Upsilon",
    'Φ' => "\\Phi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",

    // Operators
    '×' => "\\times",
    '÷' => "\\div",
    '±' => "\\pm",
    '∓' => "\\mp",
    '·' => "\\cdot",
    '°' => "^\\circ",
    '∞' => "\\infty",

    // Relations
    '≈' => "\\approx",
    '≠' => "\\neq",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≪' => "\\ll",
    '≫' => "\\gg",
    '∝' => "\\propto",
    '≡' => "\\equiv",
    '∼' => "\\sim",
    '≃' => "\\simeq",
    '≅' => "\\cong",

    // Set theory
    '∈' => "\\in",
    '∉' => "\\notin",
    '⊂' => "\\subset",
    '⊃' => "\\supset",
    '⊆' => "\\subseteq",
    '⊇' => "\\supseteq",
    '∪' => "\\cup",
    '∩' => "\\cap",
    '∅' => "\\emptyset",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '∄' => "\\nexists",

    // Arrows
    '→' => "\\rightarrow",
    '←' => "\\leftarrow",
    '↔' => "\\leftrightarrow",
    '⇒' => "\\Rightarrow",
    '⇐' => "\\Leftarrow",
    '⇔' => "\\Leftrightarrow",
    '↑' => "\\uparrow",
    '↓' => "\\downarrow",
    '↦' => "\\mapsto",

    // Calculus
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '∫' => "\\int",
    '∬' => "\\iint",
    '∭' => "\\iiint",
    '∮' => "\\oint",
    '∑' => "\\sum",
    '∏' => "\\prod",
    '√' => "\\sqrt",

    // Logic
    '∧' => "\\land",
    '∨' => "\\lor",
    '¬' => "\\neg",
    '⊕' => "\\oplus",
    '⊗' => "\\otimes",
    '⊥' => "\\perp",
    '∥' => "\\parallel",

    // Number sets and letter-like symbols
    'ℕ' => "\\mathbb{N}",
    'ℤ' => "\\mathbb{Z}",
    'ℚ' => "\\mathbb{Q}",
    'ℝ' => "\\mathbb{R}",
    'ℂ' => "\\mathbb{C}",
    'ℏ' => "\\hbar",
    'ℓ' => "\\ell",

    // Primes
    '′' => "'",
    '″' => "''",
};

// Function names typeset upright by a dedicated command
static FUNCTION_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "sin" => "\\sin",
    "cos" => "\\cos",
    "tan" => "\\tan",
    "cot" => "\\cot",
    "sec" => "\\sec",
    "csc" => "\\csc",
    "arcsin" => "\\arcsin",
    "arccos" => "\\arccos",
    "arctan" => "\\arctan",
    "sinh" => "\\sinh",
    "cosh" => "\\cosh",
    "tanh" => "\\tanh",
    "log" => "\\log",
    "ln" => "\\ln",
    "exp" => "\\exp",
    "lim" => "\\lim",
    "max" => "\\max",
    "min" => "\\min",
    "sup" => "\\sup",
    "inf" => "\\inf",
    "det" => "\\det",
    "dim" => "\\dim",
    "ker" => "\\ker",
    "gcd" => "\\gcd",
    "mod" => "\\mod",
    "arg" => "\\arg",
    "deg" => "\\deg",
};

// Accent characters: combining marks and their spacing aliases
static ACCENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "\u{0302}" => "\\hat",
    "\u{0303}" => "\\tilde",
    "\u{0304}" => "\\bar",
    "\u{20D7}" => "\\vec",
    "\u{0307}" => "\\dot",
    "\u{0308}" => "\\ddot",
    "\u{0306}" => "\\breve",
    "\u{030C}" => "\\check",
    "ˆ" => "\\hat",
    "˜" => "\\tilde",
    "¯" => "\\bar",
    "→" => "\\vec",
};

// Large operator glyphs of n-ary constructs
static NARY_OPERATORS: phf::Map<&'static str, &'static str> = phf_map! {
    "∫" => "\\int",
    "∬" => "\\iint",
    "∭" => "\\iiint",
    "∮" => "\\oint",
    "∑" => "\\sum",
    "∏" => "\\prod",
    "∐" => "\\coprod",
    "⋃" => "\\bigcup",
    "⋂" => "\\bigcap",
    "⋁" => "\\bigvee",
    "⋀" => "\\bigwedge",
};

// Fence glyphs that need escaping or a named command after \left / \right
static DELIMITERS: phf::Map<&'static str, &'static str> = phf_map! {
    "{" => "\\{",
    "}" => "\\}",
    "‖" => "\\|",
    "⌈" => "\\lceil",
    "⌉" => "\\rceil",
    "⌊" => "\\lfloor",
    "⌋" => "\\rfloor",
    "⟨" => "\\langle",
    "⟩" => "\\rangle",
    "" => ".",
};

/// LaTeX command for a Unicode math character.
#[inline]
pub fn unicode_to_latex(c: char) -> Option<&'static str> {
    UNICODE_TO_LATEX.get(&c).copied()
}

/// Command for a known function name (`sin` -> `\sin`).
#[inline]
pub fn function_command(name: &str) -> Option<&'static str> {
    FUNCTION_NAMES.get(name).copied()
}

/// Accent command; unknown or absent characters fall back to `\hat`.
#[inline]
pub fn accent_command(chr: Option<&str>) -> &'static str {
    chr.and_then(|c| ACCENTS.get(c).copied()).unwrap_or("\\hat")
}

/// N-ary operator; unknown or absent characters fall back to `\int`.
#[inline]
pub fn nary_operator(chr: Option<&str>) -> &'static str {
    chr.and_then(|c| NARY_OPERATORS.get(c).copied())
        .unwrap_or("\\int")
}

/// Delimiter glyph for `\left` / `\right`. Unmapped glyphs pass through.
#[inline]
pub fn delimiter(chr: &str) -> &str {
    DELIMITERS.get(chr).copied().unwrap_or(chr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_lookup() {
        assert_eq!(unicode_to_latex('α'), Some("\\alpha"));
        assert_eq!(unicode_to_latex('ℝ'), Some("\\mathbb{R}"));
        assert_eq!(unicode_to_latex('°'), Some("^\\circ"));
        assert_eq!(unicode_to_latex('x'), None);
    }

    #[test]
    fn test_function_lookup() {
        assert_eq!(function_command("lim"), Some("\\lim"));
        assert_eq!(function_command("foo"), None);
        assert_eq!(FUNCTION_NAMES.len(), 27);
    }

    #[test]
    fn test_accent_default() {
        assert_eq!(accent_command(Some("\u{0303}")), "\\tilde");
        assert_eq!(accent_command(Some("?")), "\\hat");
        assert_eq!(accent_command(None), "\\hat");
        assert_eq!(ACCENTS.len(), 12);
    }

    #[test]
    fn test_nary_default() {
        assert_eq!(nary_operator(Some("∑")), "\\sum");
        assert_eq!(nary_operator(Some("x")), "\\int");
        assert_eq!(nary_operator(None), "\\int");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(delimiter("{"), "\\{");
        assert_eq!(delimiter("⟨"), "\\langle");
        assert_eq!(delimiter(""), ".");
        assert_eq!(delimiter("["), "[");
        assert_eq!(delimiter("|"), "|");
    }
}
