//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::formula::latex::LatexError;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::ParseError(format!("invalid UTF-8: {}", err))
    }
}

impl From<LatexError> for Error {
    fn from(err: LatexError) -> Self {
        Error::Formula(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_error_conversion() {
        let err: Error = LatexError::DepthExceeded(300).into();
        assert!(matches!(err, Error::Formula(_)));
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_missing_part_display() {
        let err = Error::MissingPart("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing part: word/document.xml");
    }
}
