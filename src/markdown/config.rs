/// Configuration types for Markdown conversion.
///
/// This module defines the configuration options and enums used to customize
/// the Markdown conversion process. Options are plain data and serialize with
/// camelCase keys so hosts can persist them next to their own settings.
use serde::{Deserialize, Serialize};

/// Configuration options for Markdown conversion.
///
/// # Examples
///
/// ```rust
/// use docx_md::markdown::{ConversionOptions, FormulaStyle, TableAlignment};
///
/// // Create with defaults
/// let options = ConversionOptions::default();
///
/// // Or customize
/// let options = ConversionOptions::new()
///     .with_image_folder("assets")
///     .with_formula_style(FormulaStyle::LaTeX)
///     .with_table_alignment(TableAlignment::Center);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Folder images are stored in
    pub image_folder: String,
    /// Link images by bare file name instead of folder-qualified path
    pub use_relative_image_paths: bool,
    /// Delimiters around formulas
    pub formula_style: FormulaStyle,
    /// Render explicit line breaks as newlines rather than spaces
    pub preserve_line_breaks: bool,
    /// Column alignment marker used in every table separator row
    pub table_alignment: TableAlignment,
    /// Display width handed to image consumers; not used in text output
    pub default_image_width: u32,
    /// Ask the image sink to create the folder when missing
    pub create_image_folder: bool,
    /// Resolve list numbering; when off every list item is a bullet
    pub handle_numbering: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            image_folder: "attachments".to_string(),
            use_relative_image_paths: true,
            formula_style: FormulaStyle::Dollar,
            preserve_line_breaks: true,
            table_alignment: TableAlignment::Left,
            default_image_width: 600,
            create_image_folder: true,
            handle_numbering: true,
        }
    }
}

impl ConversionOptions {
    /// Create a new `ConversionOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image folder.
    #[inline]
    pub fn with_image_folder(mut self, folder: impl Into<String>) -> Self {
        self.image_folder = folder.into();
        self
    }

    /// Set whether image links use the bare file name.
    ///
    /// When disabled, links are written as `![[folder/name]]`.
    #[inline]
    pub fn with_relative_image_paths(mut self, relative: bool) -> Self {
        self.use_relative_image_paths = relative;
        self
    }

    /// Set the formula delimiter style.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docx_md::markdown::{ConversionOptions, FormulaStyle};
    ///
    /// let options = ConversionOptions::new().with_formula_style(FormulaStyle::LaTeX);
    /// ```
    #[inline]
    pub fn with_formula_style(mut self, style: FormulaStyle) -> Self {
        self.formula_style = style;
        self
    }

    /// Set whether explicit line breaks are kept.
    #[inline]
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the table column alignment.
    #[inline]
    pub fn with_table_alignment(mut self, alignment: TableAlignment) -> Self {
        self.table_alignment = alignment;
        self
    }

    /// Set the default image display width.
    #[inline]
    pub fn with_default_image_width(mut self, width: u32) -> Self {
        self.default_image_width = width;
        self
    }

    /// Set whether the image folder should be created on demand.
    #[inline]
    pub fn with_create_image_folder(mut self, create: bool) -> Self {
        self.create_image_folder = create;
        self
    }

    /// Set whether list numbering is resolved.
    #[inline]
    pub fn with_numbering(mut self, handle: bool) -> Self {
        self.handle_numbering = handle;
        self
    }
}

/// Formula delimiter styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaStyle {
    /// LaTeX math mode: `\(..\)` inline, `\[..\]` display block
    #[serde(rename = "latex")]
    LaTeX,
    /// Dollar signs: `$..$` inline, `$$..$$` display block
    #[default]
    Dollar,
}

impl FormulaStyle {
    /// Wrap rendered LaTeX in the delimiters of this style.
    ///
    /// Display math puts the delimiters on their own lines.
    pub fn wrap(self, latex: &str, display: bool) -> String {
        match (self, display) {
            (FormulaStyle::LaTeX, false) => format!("\\({}\\)", latex),
            (FormulaStyle::LaTeX, true) => format!("\\[\n{}\n\\]", latex),
            (FormulaStyle::Dollar, false) => format!("${}$", latex),
            (FormulaStyle::Dollar, true) => format!("$$\n{}\n$$", latex),
        }
    }
}

/// Column alignment of Markdown tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TableAlignment {
    /// Separator row marker for one column.
    #[inline]
    pub fn marker(self) -> &'static str {
        match self {
            TableAlignment::Left => "---",
            TableAlignment::Center => ":---:",
            TableAlignment::Right => "---:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_options_builder() {
        let options = ConversionOptions::new()
            .with_image_folder("img")
            .with_relative_image_paths(false)
            .with_formula_style(FormulaStyle::LaTeX)
            .with_line_breaks(false)
            .with_table_alignment(TableAlignment::Right)
            .with_default_image_width(320)
            .with_create_image_folder(false)
            .with_numbering(false);

        assert_eq!(options.image_folder, "img");
        assert!(!options.use_relative_image_paths);
        assert_eq!(options.formula_style, FormulaStyle::LaTeX);
        assert!(!options.preserve_line_breaks);
        assert_eq!(options.table_alignment, TableAlignment::Right);
        assert_eq!(options.default_image_width, 320);
        assert!(!options.create_image_folder);
        assert!(!options.handle_numbering);
    }

    #[test]
    fn test_conversion_options_default() {
        let options = ConversionOptions::default();
        assert_eq!(options.image_folder, "attachments");
        assert!(options.use_relative_image_paths);
        assert_eq!(options.formula_style, FormulaStyle::Dollar);
        assert!(options.preserve_line_breaks);
        assert_eq!(options.table_alignment, TableAlignment::Left);
        assert_eq!(options.default_image_width, 600);
        assert!(options.create_image_folder);
        assert!(options.handle_numbering);
    }

    #[test]
    fn test_formula_wrap() {
        assert_eq!(FormulaStyle::Dollar.wrap("x", false), "$x$");
        assert_eq!(FormulaStyle::Dollar.wrap("x", true), "$$\nx\n$$");
        assert_eq!(FormulaStyle::LaTeX.wrap("x", false), "\\(x\\)");
        assert_eq!(FormulaStyle::LaTeX.wrap("x", true), "\\[\nx\n\\]");
    }

    #[test]
    fn test_alignment_markers() {
        assert_eq!(TableAlignment::Left.marker(), "---");
        assert_eq!(TableAlignment::Center.marker(), ":---:");
        assert_eq!(TableAlignment::Right.marker(), "---:");
    }
}
