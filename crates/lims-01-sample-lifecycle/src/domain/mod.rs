//! Domain module for the Sample Lifecycle
//!
//! Contains entities, the transition table, the actor context, errors and
//! invariants.

pub mod actor;
pub mod client;
pub mod errors;
pub mod invariants;
pub mod rerun;
pub mod sample;
pub mod transitions;

pub use actor::ActorContext;
pub use client::{Client, INTERNAL_RERUN_CLIENT_NAME};
pub use errors::{LifecycleError, LifecycleResult, NotificationError};
pub use rerun::{Rerun, RetestKind, INCONCLUSIVE, POSITIVE};
pub use sample::{NewSample, Sample, SampleOrigin, API_ORIGIN_NOTE, CREATION_NOTE};
pub use transitions::{allowed_targets, transition_allowed};
