/*!
 * Error types for the tikkun crate.
 *
 * Only a malformed or unreadable document is a reportable failure of the
 * text engine. Missing per-tradition text, hint misalignment and stale page
 * indexes are resolved by fallbacks and never surface here.
 */

use thiserror::Error;

/// Errors that can occur while loading a reading document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The JSON is valid but carries neither a group list nor a flat verse list
    #[error("Malformed document '{id}': {reason}")]
    Malformed {
        /// Identifier of the document being loaded
        id: String,
        /// What was missing or wrong
        reason: String,
    },

    /// The payload is not valid JSON for the document model
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document file could not be read
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a tradition identifier is parsed at the boundary
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TraditionError {
    /// The identifier names no known tradition
    #[error("Unknown tradition: '{0}' (expected one of: standard, yemenite)")]
    Unknown(String),
}

/// Errors found while validating configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Page size must be a positive integer
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(usize),

    /// The data directory is required to locate documents
    #[error("Data directory must not be empty")]
    EmptyDataDir,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document loading
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from tradition parsing
    #[error("Tradition error: {0}")]
    Tradition(#[from] TraditionError),

    /// Error from configuration validation
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
