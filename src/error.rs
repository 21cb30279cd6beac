//! Error types for datumkit

use thiserror::Error;

/// Result type alias for datumkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datumkit
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Collection Errors
    // -------------------------------------------------------------------------
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Duplicate entry name: {0}")]
    DuplicateEntry(String),

    #[error("Invalid data shape: {0}")]
    InvalidShape(String),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Type mismatch for {name}: {reason}")]
    TypeMismatch { name: String, reason: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::EntryNotFound(_))
    }

    pub(crate) fn type_mismatch(name: impl Into<String>, source: &serde_json::Error) -> Self {
        Error::TypeMismatch {
            name: name.into(),
            reason: source.to_string(),
        }
    }
}
