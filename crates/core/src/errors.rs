//! Core error types for the interest batch service.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a batch invocation.
///
/// Invalid economic inputs are not errors: such records are skipped and
/// counted in the batch summary instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request payload: {0}")]
    Decode(#[from] DecodeError),

    #[error("Storage is not configured or unreachable: {0}")]
    Configuration(String),

    #[error("Persisting the batch failed: {0}")]
    Persistence(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the error was caused by the caller's payload and its message
    /// can safely be echoed back.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

/// Errors raised while turning a raw payload into interest inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8")]
    InvalidEncoding,

    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("payload must be a JSON array of interest records")]
    NotAnArray,

    #[error("payload contains no interest records")]
    EmptyBatch,

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A database transaction failed and was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}
