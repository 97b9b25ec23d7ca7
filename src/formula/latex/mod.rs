//! LaTeX synthesis for math trees.
//!
//! [`FormulaSynthesizer`] walks a [`MathNode`](crate::formula::omml::MathNode)
//! tree, places operands through the templates, renders literal text through
//! the symbol tables and finishes with an idempotent spacing [`cleanup`] pass.

mod cleanup;
mod converter;
mod error;
mod symbols;
mod templates;

pub use cleanup::cleanup;
pub use converter::{DEFAULT_MAX_DEPTH, FormulaSynthesizer, render_text};
pub use error::LatexError;
pub use symbols::{accent_command, delimiter, function_command, nary_operator, unicode_to_latex};
pub use templates::fraction;
