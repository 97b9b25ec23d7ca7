//! Unified error types for the converter.
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is absent
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// Parse error occurred
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Formula rendering failed
    #[error("Formula error: {0}")]
    Formula(String),

    /// Image could not be materialized
    #[error("Image error: {0}")]
    Image(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
