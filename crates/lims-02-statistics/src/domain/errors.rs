//! Error types for Statistics

use shared_types::StorageError;
use thiserror::Error;

/// Errors raised while building reports.
///
/// An empty audit trail is not an error; it yields placeholder rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// The audit trail could not be read.
    #[error("Audit trail unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for statistics operations
pub type StatisticsResult<T> = Result<T, StatisticsError>;
