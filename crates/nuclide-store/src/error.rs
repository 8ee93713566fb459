//! Store error types.

use thiserror::Error;

/// Errors that can occur loading or saving a store file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Store file is corrupted or has an unrecognized format.
    #[error("corrupted file: {0}")]
    CorruptedFile(String),

    /// Serialization failure.
    #[error("serialization: {0}")]
    Serialization(String),
}
