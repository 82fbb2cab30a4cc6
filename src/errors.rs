/*!
 * Error types for the vocap application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a raw provider API
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

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur on the OCR path.
///
/// Providers themselves never return these across the recognition boundary
/// (recognition yields `Option<OcrResult>`); they exist for the manager and
/// controller layers above it.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The selected provider is not usable in this environment
    #[error("OCR provider '{0}' is not available")]
    ProviderNotAvailable(String),

    /// A remote provider was selected without a configured credential
    #[error("Missing API key for OCR provider '{0}'")]
    MissingApiKey(String),

    /// A capture is already being processed
    #[error("An OCR pass is already in progress")]
    Busy,

    /// The provider ran but produced no usable text
    #[error("Could not extract text using provider '{0}'")]
    NoText(String),

    /// The image could not be read or decoded
    #[error("Invalid image input: {0}")]
    InvalidImage(String),
}

/// Errors that can occur during dictionary lookup
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The word to look up was empty or unusable
    #[error("Invalid lookup input: {0}")]
    InvalidInput(String),

    /// The service answered but carried no definition content
    #[error("No content received from dictionary service")]
    NoContent,

    /// The API rejected the request
    #[error("Dictionary API error with status code: {status_code}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
    },

    /// The response body could not be decoded into an entry
    #[error("Error parsing dictionary response: {0}")]
    ParseError(String),

    /// The request never completed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// No credential is configured for the service
    #[error("Dictionary API key is missing")]
    MissingApiKey,
}

impl From<ProviderError> for DictionaryError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::ApiError { status_code, .. } => Self::ApiError { status_code },
            ProviderError::ParseError(message) => Self::ParseError(message),
            ProviderError::AuthenticationError(_) => Self::MissingApiKey,
            ProviderError::RequestFailed(message) | ProviderError::ConnectionError(message) => {
                Self::NetworkError(message)
            }
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a raw provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the OCR pipeline
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Error from dictionary lookup
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

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
