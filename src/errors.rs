/*!
 * Error types for the egrul-resolver application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while talking to the registry API
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Error when making an API request fails
    #[error("Registry request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the registry itself
    #[error("Registry responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the registry
        message: String,
    },

    /// Error when parsing a registry response body fails
    #[error("Failed to parse registry response: {0}")]
    ParseError(String),

    /// The registry answered with a shape the protocol does not define
    /// (neither a pending status nor a non-empty result set)
    #[error("Registry protocol error: {0}")]
    Protocol(String),

    /// The search result never left the pending state within the attempt budget
    #[error("Registry result still pending after {attempts} poll attempts")]
    PollTimeout {
        /// Number of poll attempts made before giving up
        attempts: u32,
    },
}

/// Errors that can occur when extracting text lines from a downloaded document
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document bytes could not be opened or decoded
    #[error("Unreadable document: {0}")]
    Unreadable(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the registry client
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error from document text extraction
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(String),

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
        Self::Config(error.to_string())
    }
}
