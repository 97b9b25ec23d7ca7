// Template helpers for LaTeX constructs
//
// Operands arrive already rendered; these functions only place them.

/// An operand containing a visible `+`, `-` or `*` gets an extra brace group.
#[inline]
pub fn needs_braces(operand: &str) -> bool {
    operand.contains(['+', '-', '*'])
}

#[inline]
fn braced(operand: &str) -> String {
    if needs_braces(operand) {
        format!("{{{}}}", operand)
    } else {
        operand.to_string()
    }
}

pub fn fraction(numerator: &str, denominator: &str) -> String {
    format!("\\frac{{{}}}{{{}}}", braced(numerator), braced(denominator))
}

/// Square roots drop a blank or `2` degree.
pub fn radical(degree: Option<&str>, base: &str) -> String {
    match degree.map(str::trim) {
        Some(deg) if !deg.is_empty() && deg != "2" => format!("\\sqrt[{}]{{{}}}", deg, base),
        _ => format!("\\sqrt{{{}}}", base),
    }
}

pub fn superscript(base: &str, sup: &str) -> String {
    format!("{}^{{{}}}", base, sup)
}

pub fn subscript(base: &str, sub: &str) -> String {
    format!("{}_{{{}}}", base, sub)
}

pub fn sub_superscript(base: &str, sub: &str, sup: &str) -> String {
    format!("{}_{{{}}}^{{{}}}", base, sub, sup)
}

pub fn pre_scripts(base: &str, sub: &str, sup: &str) -> String {
    format!("{{}}_{{{}}}^{{{}}}{}", sub, sup, base)
}

/// Large operator with optional limits; the base follows after one space.
pub fn nary(operator: &str, sub: &str, sup: &str, base: &str) -> String {
    let mut out = String::from(operator);
    if !sub.is_empty() {
        out.push_str("_{");
        out.push_str(sub);
        out.push('}');
    }
    if !sup.is_empty() {
        out.push_str("^{");
        out.push_str(sup);
        out.push('}');
    }
    if !base.is_empty() {
        out.push(' ');
        out.push_str(base);
    }
    out
}

pub fn matrix(rows: &[Vec<String>]) -> String {
    let body = rows
        .iter()
        .map(|cells| cells.join(" & "))
        .collect::<Vec<_>>()
        .join(" \\\\ ");
    format!("\\begin{{pmatrix}} {} \\end{{pmatrix}}", body)
}

pub fn delimited(left: &str, right: &str, operands: &[String]) -> String {
    format!("\\left{} {} \\right{}", left, operands.join(", "), right)
}

/// Known functions use their command, anything else `\operatorname`.
pub fn function(command: Option<&str>, name: &str, argument: &str) -> String {
    match command {
        Some(cmd) => format!("{} {}", cmd, argument),
        None => format!("\\operatorname{{{}}} {}", name, argument),
    }
}

pub fn equation_array(equations: &[String]) -> String {
    match equations {
        [] => String::new(),
        [single] => single.clone(),
        many => format!("\\begin{{aligned}} {} \\end{{aligned}}", many.join(" \\\\ ")),
    }
}

#[inline]
pub fn command_group(command: &str, body: &str) -> String {
    format!("{}{{{}}}", command, body)
}

/// Braces above or below; any other grouping character keeps the bare base.
pub fn group_char(chr: Option<&str>, base: &str) -> String {
    match chr {
        Some("⏟" | "︸") => command_group("\\underbrace", base),
        Some("⏞" | "︷") => command_group("\\overbrace", base),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_bracing() {
        assert_eq!(fraction("a+b", "c"), "\\frac{{a+b}}{c}");
        assert_eq!(fraction("1", "x*y"), "\\frac{1}{{x*y}}");
        assert_eq!(fraction("a", "b"), "\\frac{a}{b}");
    }

    #[test]
    fn test_radical_degree() {
        assert_eq!(radical(Some("3"), "x"), "\\sqrt[3]{x}");
        assert_eq!(radical(Some("2"), "x"), "\\sqrt{x}");
        assert_eq!(radical(Some("  "), "x"), "\\sqrt{x}");
        assert_eq!(radical(None, "x"), "\\sqrt{x}");
    }

    #[test]
    fn test_scripts() {
        assert_eq!(superscript("x", "2"), "x^{2}");
        assert_eq!(subscript("x", "i"), "x_{i}");
        assert_eq!(sub_superscript("x", "i", "2"), "x_{i}^{2}");
        assert_eq!(pre_scripts("C", "n", "k"), "{}_{n}^{k}C");
    }

    #[test]
    fn test_nary_spacing() {
        assert_eq!(nary("\\sum", "i=1", "n", "i"), "\\sum_{i=1}^{n} i");
        assert_eq!(nary("\\int", "", "", "f"), "\\int f");
        assert_eq!(nary("\\int", "0", "", ""), "\\int_{0}");
    }

    #[test]
    fn test_matrix_and_array() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        assert_eq!(
            matrix(&rows),
            "\\begin{pmatrix} a & b \\\\ c & d \\end{pmatrix}"
        );
        assert_eq!(equation_array(&["x=1".to_string()]), "x=1");
        assert_eq!(
            equation_array(&["a".to_string(), "b".to_string()]),
            "\\begin{aligned} a \\\\ b \\end{aligned}"
        );
    }

    #[test]
    fn test_function_and_groups() {
        assert_eq!(function(Some("\\sin"), "sin", "x"), "\\sin x");
        assert_eq!(function(None, "foo", "x"), "\\operatorname{foo} x");
        assert_eq!(group_char(Some("⏟"), "a"), "\\underbrace{a}");
        assert_eq!(group_char(Some("^"), "a"), "a");
        assert_eq!(delimited("(", ")", &["a".into(), "b".into()]), "\\left( a, b \\right)");
    }
}
