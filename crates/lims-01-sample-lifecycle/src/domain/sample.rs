//! Sample entity and creation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ClientId, Placement, SampleId, SampleState};

/// Note on the creation record of samples created inside the LIMS.
pub const CREATION_NOTE: &str = "Sample Created from LIMS";

/// Note on the creation record of samples requested through the API.
///
/// The statistics engine counts a sample as "requested" by matching this
/// text, so it must not change.
pub const API_ORIGIN_NOTE: &str = "Created from API";

/// Where a sample entered the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleOrigin {
    /// Registered by lab staff.
    #[default]
    Lims,
    /// Requested by a client through the API.
    Api,
}

impl SampleOrigin {
    /// Note written on the creation record.
    pub fn creation_note(self) -> &'static str {
        match self {
            Self::Lims => CREATION_NOTE,
            Self::Api => API_ORIGIN_NOTE,
        }
    }
}

/// A laboratory sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Internal key
    pub id: SampleId,
    /// Externally visible code; shared by a sample and its retest
    pub identifier: String,
    /// Owning client
    pub client: ClientId,
    /// Current pipeline stage
    pub state: SampleState,
    /// Whether this sample was forked from another
    pub is_retest: bool,
    /// Control samples are excluded from client statistics
    pub control: bool,
    /// Plate and well, if placed
    pub placement: Option<Placement>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl Sample {
    /// Build a sample from creation input with a resolved identifier.
    pub fn from_new(new: NewSample, identifier: String, now: DateTime<Utc>) -> Self {
        Self {
            id: SampleId::new(),
            identifier,
            client: new.client,
            state: new.state,
            is_retest: new.is_retest,
            control: new.control,
            placement: new.placement,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSample {
    /// Identifier to use; generated when absent
    pub identifier: Option<String>,
    /// Owning client
    pub client: ClientId,
    /// Initial state
    pub state: SampleState,
    /// Retest flag
    pub is_retest: bool,
    /// Control flag
    pub control: bool,
    /// Initial placement
    pub placement: Option<Placement>,
    /// Intake channel
    pub origin: SampleOrigin,
}

impl NewSample {
    /// A `received` sample for `client` with a generated identifier.
    pub fn for_client(client: ClientId) -> Self {
        Self {
            identifier: None,
            client,
            state: SampleState::default(),
            is_retest: false,
            control: false,
            placement: None,
            origin: SampleOrigin::default(),
        }
    }

    /// Use a fixed identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Start in `state`.
    pub fn with_state(mut self, state: SampleState) -> Self {
        self.state = state;
        self
    }

    /// Mark as a control sample.
    pub fn control(mut self) -> Self {
        self.control = true;
        self
    }

    /// Set the intake channel.
    pub fn with_origin(mut self, origin: SampleOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Place on a plate at creation.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }
}
