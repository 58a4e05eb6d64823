//! Error types for capindex
//!
//! Provides a unified error type for all operations.
//!
//! Only a handful of these ever reach the caller of a run (configuration and
//! directory listing failures). Everything raised while reading a single index
//! file or a single record is absorbed by the scanner, which skips that file or
//! record and moves on.

use thiserror::Error;

/// Result type alias using CapIndexError
pub type Result<T> = std::result::Result<T, CapIndexError>;

/// Unified error type for capindex operations
#[derive(Debug, Error)]
pub enum CapIndexError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid index file: {0}")]
    InvalidIndex(String),

    // -------------------------------------------------------------------------
    // Key Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Malformed key: tag {tag} needs {expected} bytes, got {actual}")]
    MalformedKey {
        tag: u8,
        expected: usize,
        actual: usize,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CapIndexError {
    fn from(err: serde_json::Error) -> Self {
        CapIndexError::Serialization(err.to_string())
    }
}
