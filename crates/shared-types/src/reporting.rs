//! # Audit Trail Read Port
//!
//! The statistics subsystem reads the audit trail through this trait only.
//! Storage adapters implement it next to their write side.

use chrono::{DateTime, Utc};

use crate::entities::{AuditEntry, ClientId, SampleSummary};
use crate::errors::StorageError;

/// Read-only access to accumulated audit records and sample summaries.
///
/// Implementations need not be transactionally consistent with in-flight
/// writes.
pub trait AuditTrailReader: Send + Sync {
    /// Every audit entry of every sample owned by `client`, control samples
    /// included (callers filter).
    fn audit_entries_for_client(&self, client: ClientId) -> Result<Vec<AuditEntry>, StorageError>;

    /// Samples created at or after `since`.
    fn sample_summaries_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SampleSummary>, StorageError>;

    /// All samples.
    fn sample_summaries(&self) -> Result<Vec<SampleSummary>, StorageError>;
}
