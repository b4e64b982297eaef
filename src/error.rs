//! Error types for studypdf library.

use std::io;
use thiserror::Error;

/// Result type alias for studypdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing study documents.
///
/// Layout itself never fails; these cover export, configuration and the
/// external collaborators that supply the text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while assembling PDF output.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// A prompt template referenced an unknown placeholder.
    #[error("Template error: {0}")]
    Template(String),

    /// A required API credential is missing.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// User input is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The language model provider returned an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The web search tool returned an error.
    #[error("Search error: {0}")]
    Search(String),

    /// A web page could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingCredential("Gemini API key");
        assert_eq!(err.to_string(), "Missing credential: Gemini API key");

        let err = Error::Template("unknown placeholder {plan}".to_string());
        assert_eq!(err.to_string(), "Template error: unknown placeholder {plan}");

        let err = Error::Fetch("https://example.com returned 404".to_string());
        assert_eq!(err.to_string(), "Fetch error: https://example.com returned 404");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
