/*!
 * Error types for the xliff-translator application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with translation backends
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The backend answered but produced no translation for the text
    #[error("No translation found for: {0}")]
    TranslationNotFound(String),
}

/// Errors that can occur while reading or writing XLIFF documents
#[derive(Error, Debug)]
pub enum XliffError {
    /// The document is not well-formed XML
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// The document bytes are not valid UTF-8
    #[error("Invalid UTF-8 in document: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The document contains no root element
    #[error("Document has no root element")]
    MissingRoot,

    /// Serializing the tree failed
    #[error("Failed to write XML: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for XliffError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for XliffError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with the XLIFF document
    #[error("XLIFF error: {0}")]
    Xliff(#[from] XliffError),

    /// The cloned target walked to a different number of runs than the source
    #[error("Text run count mismatch in unit '{unit_id}': expected {expected}, got {actual}")]
    RunCountMismatch {
        /// Unit being rebuilt
        unit_id: String,
        /// Runs collected from the source
        expected: usize,
        /// Translations supplied or runs found in the clone
        actual: usize,
    },

    /// The progress callback asked to stop the run
    #[error("Translation aborted by progress callback: {0}")]
    Aborted(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from XLIFF processing
    #[error("XLIFF error: {0}")]
    Xliff(#[from] XliffError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
