//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{Field, ValidationError};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// User input failed a field rule; raised before anything is written
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A row read back from the transaction file failed validation
    #[error("Malformed record at line {line} ({field}): {reason}")]
    MalformedRecord {
        line: u64,
        field: Field,
        reason: String,
    },

    /// Positional reference outside `[1, count]`
    #[error("Invalid transaction ID {id}: expected a number between 1 and {count}")]
    InvalidRecordId { id: usize, count: usize },

    /// Storage errors (read, write, rename)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backing file is absent
    #[error("No transactions found for user '{0}'. Please add transactions first.")]
    NotFound(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a malformed-record error from a failed row validation
    pub fn malformed(line: u64, err: ValidationError) -> Self {
        Self::MalformedRecord {
            line,
            field: err.field,
            reason: err.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
