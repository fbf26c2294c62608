//! # Core Domain Entities
//!
//! Defines the sample-tracking entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `SampleId`, `ClientId`, `RecordId`, `RerunId`, `Actor`
//! - **Lifecycle**: `SampleState` (12 ordinal states)
//! - **Audit**: `Record`, `AuditEntry`
//! - **Reporting**: `SampleSummary`
//! - **Layout**: `Placement`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Internal key of a sample row. Never shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleId(pub Uuid);

impl SampleId {
    /// Allocate a fresh key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SampleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a client account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Allocate a fresh key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Allocate a fresh key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a rerun link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RerunId(pub Uuid);

impl RerunId {
    /// Allocate a fresh key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RerunId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity attributed to a state change in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor(String);

impl Actor {
    /// Create an actor from a user name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: LIFECYCLE
// =============================================================================

/// Pipeline stage of a sample.
///
/// The discriminants are the persisted ordinals. The lifecycle's single-step
/// fallback rule and the "reached at least" reports compare these numbers
/// directly, so the order must never change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SampleState {
    /// Ordered by a client, not yet shipped.
    Requested = 0,
    /// Collection kit dispatched.
    Dispatched = 1,
    /// Material received at the lab.
    #[default]
    Received = 2,
    /// Preparation started.
    Preparing = 3,
    /// Preparation finished.
    Prepared = 4,
    /// Assay run.
    Tested = 5,
    /// Result analysed.
    Analysed = 6,
    /// Result sent to the client.
    Communicated = 7,
    /// Delivery confirmed.
    Commcomplete = 8,
    /// Delivery failed.
    Commfailed = 9,
    /// Sample rejected.
    Rejected = 10,
    /// Superseded by a retest sample.
    Retest = 11,
}

impl SampleState {
    /// Every state in ordinal order.
    pub const ALL: [SampleState; 12] = [
        Self::Requested,
        Self::Dispatched,
        Self::Received,
        Self::Preparing,
        Self::Prepared,
        Self::Tested,
        Self::Analysed,
        Self::Communicated,
        Self::Commcomplete,
        Self::Commfailed,
        Self::Rejected,
        Self::Retest,
    ];

    /// Persisted ordinal (0-11).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a state by ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// The state one ordinal step ahead, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Lowercase name as used in logs and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Dispatched => "dispatched",
            Self::Received => "received",
            Self::Preparing => "preparing",
            Self::Prepared => "prepared",
            Self::Tested => "tested",
            Self::Analysed => "analysed",
            Self::Communicated => "communicated",
            Self::Commcomplete => "commcomplete",
            Self::Commfailed => "commfailed",
            Self::Rejected => "rejected",
            Self::Retest => "retest",
        }
    }
}

impl fmt::Display for SampleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CLUSTER C: AUDIT
// =============================================================================

/// One immutable audit entry: the sample entered `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record key.
    pub id: RecordId,
    /// Sample the record belongs to.
    pub sample: SampleId,
    /// State the sample transitioned into.
    pub state: SampleState,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Who caused the change.
    pub actor: Actor,
    /// When the change happened.
    pub recorded_at: DateTime<Utc>,
}

impl Record {
    /// Create a record stamped at `recorded_at`.
    pub fn new(
        sample: SampleId,
        state: SampleState,
        note: Option<String>,
        actor: Actor,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            sample,
            state,
            note,
            actor,
            recorded_at,
        }
    }
}

/// An audit record joined with the sample attributes reporting filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Sample the record belongs to.
    pub sample: SampleId,
    /// Owning client of the sample.
    pub client: ClientId,
    /// Control samples are excluded from client statistics.
    pub control: bool,
    /// State entered.
    pub state: SampleState,
    /// Note recorded with the state change.
    pub note: Option<String>,
    /// When the change happened.
    pub recorded_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER D: REPORTING
// =============================================================================

/// Minimal sample view for creation-date reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Sample key.
    pub id: SampleId,
    /// Current state.
    pub state: SampleState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER E: LAYOUT
// =============================================================================

/// Physical position of a sample on a plate.
///
/// A sample can sit on a plate before it has a well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Plate barcode.
    pub plate: String,
    /// Well coordinate, e.g. `A1`.
    pub well: Option<String>,
}

impl Placement {
    /// Create a placement in a well.
    pub fn new(plate: impl Into<String>, well: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            well: Some(well.into()),
        }
    }

    /// Create a placement on a plate with no well yet.
    pub fn plate_only(plate: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            well: None,
        }
    }

    /// Same plate, well cleared.
    pub fn without_well(&self) -> Self {
        Self::plate_only(self.plate.clone())
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.well {
            Some(well) => write!(f, "{}/{}", self.plate, well),
            None => write!(f, "{}", self.plate),
        }
    }
}
