//! # Sample State Machine
//!
//! Applies a requested state change to an in-memory sample and produces the
//! audit record that must be stored with it.
//!
//! ## Outcomes
//!
//! - **Accepted**: state and `updated_at` change, one record is produced.
//! - **No-op**: the sample is already in the target state; nothing changes
//!   and no record is produced.
//! - **Rejected**: the sample is untouched and the error names both states.

use chrono::{DateTime, Utc};
use shared_types::{Actor, Record, SampleState};

use crate::domain::errors::{LifecycleError, LifecycleResult};
use crate::domain::sample::{Sample, SampleOrigin};
use crate::domain::transitions::transition_allowed;

/// Result of [`apply_transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// State before the request.
    pub previous: SampleState,
    /// State after the request.
    pub current: SampleState,
    /// Audit record to persist; `None` for a no-op.
    pub record: Option<Record>,
}

impl TransitionOutcome {
    /// Whether the state actually changed.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Move `sample` to `target`, attributing the change to `actor`.
///
/// Legality is checked before the actor, so an illegal request reports
/// `InvalidTransition` even without an actor.
pub fn apply_transition(
    sample: &mut Sample,
    target: SampleState,
    actor: Option<&Actor>,
    note: Option<String>,
    now: DateTime<Utc>,
) -> LifecycleResult<TransitionOutcome> {
    let previous = sample.state;

    if previous == target {
        return Ok(TransitionOutcome {
            previous,
            current: target,
            record: None,
        });
    }

    if !transition_allowed(previous, target) {
        return Err(LifecycleError::InvalidTransition {
            from: previous,
            to: target,
        });
    }

    let actor = actor.ok_or(LifecycleError::MissingActor)?;

    sample.state = target;
    sample.updated_at = now;

    let record = Record::new(sample.id, target, note, actor.clone(), now);

    Ok(TransitionOutcome {
        previous,
        current: target,
        record: Some(record),
    })
}

/// The record written together with a new sample.
pub fn creation_record(
    sample: &Sample,
    origin: SampleOrigin,
    actor: Option<&Actor>,
    now: DateTime<Utc>,
) -> LifecycleResult<Record> {
    let actor = actor.ok_or(LifecycleError::MissingActor)?;
    Ok(Record::new(
        sample.id,
        sample.state,
        Some(origin.creation_note().to_string()),
        actor.clone(),
        now,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{NewSample, API_ORIGIN_NOTE, CREATION_NOTE};
    use chrono::Duration;
    use shared_types::ClientId;

    fn sample_in(state: SampleState) -> Sample {
        let new = NewSample::for_client(ClientId::new()).with_state(state);
        Sample::from_new(new, "S-1".to_string(), Utc::now() - Duration::hours(1))
    }

    fn tech() -> Actor {
        Actor::new("tech")
    }

    #[test]
    fn test_accepted_transition_writes_record() {
        let mut sample = sample_in(SampleState::Received);
        let now = Utc::now();

        let outcome =
            apply_transition(&mut sample, SampleState::Preparing, Some(&tech()), None, now)
                .unwrap();

        assert!(outcome.changed());
        assert_eq!(sample.state, SampleState::Preparing);
        assert_eq!(sample.updated_at, now);

        let record = outcome.record.unwrap();
        assert_eq!(record.state, SampleState::Preparing);
        assert_eq!(record.actor, tech());
        assert_eq!(record.sample, sample.id);
        assert!(record.note.is_none());
    }

    #[test]
    fn test_note_is_carried() {
        let mut sample = sample_in(SampleState::Analysed);
        let outcome = apply_transition(
            &mut sample,
            SampleState::Communicated,
            Some(&tech()),
            Some("emailed".to_string()),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(outcome.record.unwrap().note.as_deref(), Some("emailed"));
    }

    #[test]
    fn test_invalid_transition_leaves_sample_untouched() {
        let mut sample = sample_in(SampleState::Received);
        let before = sample.clone();

        let err = apply_transition(&mut sample, SampleState::Tested, Some(&tech()), None, Utc::now())
            .unwrap_err();

        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: SampleState::Received,
                to: SampleState::Tested,
            }
        );
        assert_eq!(sample, before);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut sample = sample_in(SampleState::Prepared);
        let before = sample.clone();

        let outcome =
            apply_transition(&mut sample, SampleState::Prepared, None, None, Utc::now()).unwrap();

        assert!(!outcome.changed());
        assert!(outcome.record.is_none());
        assert_eq!(sample, before);
    }

    #[test]
    fn test_missing_actor_leaves_sample_untouched() {
        let mut sample = sample_in(SampleState::Communicated);
        let before = sample.clone();

        let err = apply_transition(&mut sample, SampleState::Commfailed, None, None, Utc::now())
            .unwrap_err();

        assert_eq!(err, LifecycleError::MissingActor);
        assert_eq!(sample, before);
    }

    #[test]
    fn test_creation_record_notes() {
        let sample = sample_in(SampleState::Requested);

        let lims = creation_record(&sample, SampleOrigin::Lims, Some(&tech()), Utc::now()).unwrap();
        assert_eq!(lims.note.as_deref(), Some(CREATION_NOTE));
        assert_eq!(lims.state, SampleState::Requested);

        let api = creation_record(&sample, SampleOrigin::Api, Some(&tech()), Utc::now()).unwrap();
        assert_eq!(api.note.as_deref(), Some(API_ORIGIN_NOTE));
    }

    #[test]
    fn test_creation_record_requires_actor() {
        let sample = sample_in(SampleState::Received);
        assert_eq!(
            creation_record(&sample, SampleOrigin::Lims, None, Utc::now()),
            Err(LifecycleError::MissingActor)
        );
    }
}
