use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
// LeftmostFirst keeps "\r\n" from being split into two line breaks.
static TABLE_CELL_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .build(["|", "\r\n", "\n"])
        .expect("Failed to build table cell escaper")
});

/// Escape content so it can sit inside a single Markdown table cell.
///
/// Pipes would be read as column delimiters and raw line breaks would end the
/// row, so both are replaced.
///
/// # Examples
///
/// ```
/// use docx_md::common::xml::escape_table_cell;
/// assert_eq!(escape_table_cell("a | b"), "a \\| b");
/// assert_eq!(escape_table_cell("line1\nline2"), "line1<br>line2");
/// ```
#[inline]
pub fn escape_table_cell(s: &str) -> String {
    TABLE_CELL_ESCAPER.replace_all(s, &["\\|", "<br>", "<br>"])
}
