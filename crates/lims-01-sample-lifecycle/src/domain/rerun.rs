//! Rerun links between a source sample and its retest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{RerunId, SampleId};

/// Canonical reason: the result could not be called.
pub const INCONCLUSIVE: &str = "Inconclusive";

/// Canonical reason: confirm a positive result.
pub const POSITIVE: &str = "Positive";

/// Link from a source sample to the retest forked from it.
///
/// At most one exists per source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rerun {
    pub id: RerunId,
    pub source: SampleId,
    pub retest: SampleId,
    /// Free-text reason
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Rerun {
    pub fn new(
        source: SampleId,
        retest: SampleId,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RerunId::new(),
            source,
            retest,
            reason: reason.into(),
            created_at,
        }
    }
}

/// Which flavor of retest is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetestKind {
    /// Same client as the source.
    Ordinary,
    /// After the result settled; owned by the internal rerun client.
    Posthoc,
}

impl RetestKind {
    pub fn is_posthoc(self) -> bool {
        matches!(self, Self::Posthoc)
    }
}
