//! OMML (Office Math Markup Language) tree building.
//!
//! The structural parser hands over math subtrees untouched. This module
//! classifies every element into a closed [`MathKind`] set and produces an
//! immutable [`MathNode`] tree for the LaTeX synthesizer.

mod builder;
mod elements;
mod lookup;

pub use builder::{MAX_TREE_DEPTH, MathTreeBuilder};
pub use elements::{MathAttributes, MathKind, MathNode};
pub use lookup::{ELEMENT_KINDS, kind_for_tag};
