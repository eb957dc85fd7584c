/*!
 * Error types for the msgwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
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
        message: String
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The API returned a response with no usable text
    #[error("Empty response from provider")]
    EmptyResponse,
}

/// Structural verification failures for a translated file.
///
/// These compare a translated file against its source positionally; they catch
/// dropped, merged or mangled record lines, not mistranslation. Line numbers
/// are 1-based and point at the first offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The translated file has a different number of lines than the source
    #[error("line count mismatch: original has {original} lines, translation has {translated}")]
    LineCountMismatch {
        /// Line count of the source file
        original: usize,
        /// Line count of the translated file
        translated: usize,
    },

    /// A record line carries a different leading {id} field than its counterpart
    #[error("id mismatch on line {line}: original '{{{original}}}', translation '{{{translated}}}'")]
    IdMismatch {
        /// 1-based line number of the mismatch
        line: usize,
        /// Leading id field from the source line
        original: String,
        /// Leading id field from the translated line
        translated: String,
    },

    /// A record line is missing a closing brace
    #[error("malformed record line {line}: missing closing brace")]
    MalformedLine {
        /// 1-based line number of the malformed line
        line: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration, raised before any work begins
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Structural verification failure
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),

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
