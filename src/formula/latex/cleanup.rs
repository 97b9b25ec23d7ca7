// Final spacing normalization of an assembled LaTeX string
//
// The pass looks at every pair of neighbouring non-whitespace characters and
// decides whether exactly one space or nothing separates them. The decision
// depends only on the pair and on whether whitespace was there before, so
// running the pass on its own output changes nothing.

#[inline]
fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '=')
}

#[inline]
fn is_script(c: char) -> bool {
    matches!(c, '_' | '^')
}

fn wants_space(prev: char, next: char, had_space: bool) -> bool {
    if prev == '{' || next == '}' {
        return false;
    }
    // `\Delta _` keeps its space, `} _` and `2 ^` lose it
    if is_script(next) && !prev.is_ascii_alphabetic() && prev != '\\' {
        return false;
    }
    if is_script(prev) && next == '{' {
        return false;
    }
    if is_operator(prev) || is_operator(next) {
        return true;
    }
    had_space
}

/// Normalize operator spacing, collapse whitespace, tighten braces and scripts, trim.
pub fn cleanup(latex: &str) -> String {
    let mut out = String::with_capacity(latex.len() + 8);
    let mut prev: Option<char> = None;
    let mut had_space = false;

    for c in latex.chars() {
        if c.is_whitespace() {
            had_space = true;
            continue;
        }
        if let Some(p) = prev
            && wants_space(p, c, had_space)
        {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
        had_space = false;
    }
    out
}
