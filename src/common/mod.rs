//! Common types and utilities shared by the parsers and synthesizers.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use xml::{XmlElement, XmlNode};
