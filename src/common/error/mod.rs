//! Unified error types for the converter.
//!
//! Only fatal conditions surface as [`Error`]. Per-element problems are
//! collected as warnings on the conversion result instead.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
