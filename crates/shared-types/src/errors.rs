//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write conflicts with an existing row.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
