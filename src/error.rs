//! Error types for talk2data.
//!
//! Defines the main error enum used throughout the crate. Every variant
//! carries a plain-text message suitable for showing to an end user.

use thiserror::Error;

/// Main error type for talk2data operations.
#[derive(Error, Debug)]
pub enum Talk2DataError {
    /// The chat-completions call failed or returned a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No SQL statement could be parsed from the model output.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The extracted SQL failed against the store (syntax, missing column, etc.)
    #[error("Execution error: {0}")]
    Execution(String),

    /// The uploaded file could not be parsed into tabular form.
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// A referenced table does not exist in the store.
    #[error("Table not found: {0}")]
    NotFound(String),

    /// Configuration errors (invalid config file, bad URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, misuse of the API).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Talk2DataError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates an extraction error with the given message.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates an ingestion error with the given message.
    pub fn ingestion(msg: impl Into<String>) -> Self {
        Self::Ingestion(msg.into())
    }

    /// Creates a not-found error naming the missing table.
    pub fn not_found(table: impl Into<String>) -> Self {
        Self::NotFound(table.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Extraction(_) => "Extraction Error",
            Self::Execution(_) => "Execution Error",
            Self::Ingestion(_) => "Ingestion Error",
            Self::NotFound(_) => "Not Found",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using Talk2DataError.
pub type Result<T> = std::result::Result<T, Talk2DataError>;
