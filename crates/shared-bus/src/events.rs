//! # Lifecycle Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Actor, ClientId, SampleId, SampleState};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    /// A sample was created together with its creation record.
    SampleCreated {
        /// Internal key.
        sample: SampleId,
        /// Visible identifier.
        identifier: String,
        /// Owning client.
        client: ClientId,
        /// Initial state.
        state: SampleState,
        /// Whether the sample is a retest.
        is_retest: bool,
    },

    /// A sample moved between two different states.
    SampleTransitioned {
        /// Internal key.
        sample: SampleId,
        /// Visible identifier.
        identifier: String,
        /// State before the change.
        from: SampleState,
        /// State after the change.
        to: SampleState,
        /// Actor the record was attributed to.
        actor: Actor,
    },

    // =========================================================================
    // NOTIFICATIONS (only when notifications are enabled)
    // =========================================================================
    /// The sample entered `communicated`; the client should get its result.
    ResultReady {
        /// Internal key.
        sample: SampleId,
        /// Visible identifier.
        identifier: String,
        /// Owning client.
        client: ClientId,
        /// Actor that caused the change.
        actor: Actor,
    },

    /// The sample entered `rejected`; the client should be told.
    SampleRejected {
        /// Internal key.
        sample: SampleId,
        /// Visible identifier.
        identifier: String,
        /// Owning client.
        client: ClientId,
        /// Actor that caused the change.
        actor: Actor,
    },

    // =========================================================================
    // RERUNS
    // =========================================================================
    /// A retest sample was forked from a source sample.
    RetestCreated {
        /// Source sample, now in `retest`.
        source: SampleId,
        /// New retest sample.
        retest: SampleId,
        /// Shared visible identifier.
        identifier: String,
        /// Free-text reason.
        reason: String,
        /// Whether the retest went to the internal rerun client.
        posthoc: bool,
    },
}

impl LifecycleEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SampleCreated { .. } | Self::SampleTransitioned { .. } => EventTopic::Lifecycle,
            Self::ResultReady { .. } | Self::SampleRejected { .. } => EventTopic::Notifications,
            Self::RetestCreated { .. } => EventTopic::Reruns,
        }
    }

    /// The sample the event is about. For reruns, the new retest sample.
    #[must_use]
    pub fn sample(&self) -> SampleId {
        match self {
            Self::SampleCreated { sample, .. }
            | Self::SampleTransitioned { sample, .. }
            | Self::ResultReady { sample, .. }
            | Self::SampleRejected { sample, .. } => *sample,
            Self::RetestCreated { retest, .. } => *retest,
        }
    }

    /// Short event name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SampleCreated { .. } => "sample_created",
            Self::SampleTransitioned { .. } => "sample_transitioned",
            Self::ResultReady { .. } => "result_ready",
            Self::SampleRejected { .. } => "sample_rejected",
            Self::RetestCreated { .. } => "retest_created",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Creation and transitions.
    Lifecycle,
    /// Result and rejection notices.
    Notifications,
    /// Retest creation.
    Reruns,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Samples to include. Empty means all samples.
    pub samples: Vec<SampleId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            samples: Vec::new(),
        }
    }

    /// Create a filter for events about specific samples.
    #[must_use]
    pub fn for_samples(samples: Vec<SampleId>) -> Self {
        Self {
            topics: Vec::new(),
            samples,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LifecycleEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let sample_match = self.samples.is_empty() || self.samples.contains(&event.sample());

        topic_match && sample_match
    }
}
