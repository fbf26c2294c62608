//! Error types for the Sample Lifecycle

use shared_types::{SampleId, SampleState, StorageError};
use thiserror::Error;

/// All errors a lifecycle operation can raise.
///
/// Every variant is raised before the unit of work commits, so none of them
/// leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Illegal source/target pair
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: SampleState, to: SampleState },

    /// The source already has a rerun
    #[error("Retest already exists for sample {identifier}")]
    DuplicateRerun { identifier: String },

    /// Retests cannot be retested
    #[error("Sample {identifier} is a rerun")]
    SourceIsRetest { identifier: String },

    /// Posthoc retests need a settled result
    #[error("Sample {identifier} cannot be retested unless communicated (state: {state})")]
    NotEligibleForPosthocRetest {
        identifier: String,
        state: SampleState,
    },

    /// (identifier, is_retest) already taken
    #[error("Identifier {identifier} already in use (is_retest: {is_retest})")]
    DuplicateIdentifier { identifier: String, is_retest: bool },

    /// No actor resolved for an audit record
    #[error("No actor available to attribute the audit record")]
    MissingActor,

    /// Delegated plate/well check failed
    #[error("Sample {identifier} exists in another well on plate {plate}")]
    WellConflict { identifier: String, plate: String },

    /// Unknown sample key
    #[error("Sample not found: {0}")]
    SampleNotFound(SampleId),

    /// Storage adapter failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Failure reported by a notification dispatcher.
///
/// Never converted into a [`LifecycleError`]; the caller logs it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// Delivery to the downstream channel failed
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}
