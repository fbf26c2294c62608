//! # Rerun Protocol
//!
//! Preconditions and attribute capture for forking a retest from a source
//! sample. The service runs these inside its unit of work.

use shared_types::{ClientId, Placement, SampleState};

use crate::domain::errors::{LifecycleError, LifecycleResult};
use crate::domain::rerun::RetestKind;
use crate::domain::sample::{NewSample, Sample, SampleOrigin};

/// Check whether `source` may be retested.
///
/// Checked in order: an existing rerun, a retest source, then (posthoc only)
/// a settled `commcomplete` result.
pub fn check_retest_preconditions(
    source: &Sample,
    has_rerun: bool,
    kind: RetestKind,
) -> LifecycleResult<()> {
    if has_rerun {
        return Err(LifecycleError::DuplicateRerun {
            identifier: source.identifier.clone(),
        });
    }

    if source.is_retest {
        return Err(LifecycleError::SourceIsRetest {
            identifier: source.identifier.clone(),
        });
    }

    if kind.is_posthoc() && source.state != SampleState::Commcomplete {
        return Err(LifecycleError::NotEligibleForPosthocRetest {
            identifier: source.identifier.clone(),
            state: source.state,
        });
    }

    Ok(())
}

/// Creation input for the retest of `source`.
///
/// Copies everything but identity; the copy starts in `received` with the
/// retest flag set. It stays on the source's plate but gets no well, since
/// the source still occupies it. `client` replaces the owner when given.
pub fn retest_attributes(source: &Sample, client: Option<ClientId>) -> NewSample {
    NewSample {
        identifier: Some(source.identifier.clone()),
        client: client.unwrap_or(source.client),
        state: SampleState::Received,
        is_retest: true,
        control: source.control,
        placement: source.placement.as_ref().map(Placement::without_well),
        origin: SampleOrigin::Lims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn source(state: SampleState) -> Sample {
        let new = NewSample::for_client(ClientId::new())
            .with_state(state)
            .with_placement(Placement::new("P7", "C3"));
        Sample::from_new(new, "SRC".to_string(), Utc::now())
    }

    #[test]
    fn test_ordinary_retest_any_state() {
        for state in SampleState::ALL {
            let s = source(state);
            assert!(check_retest_preconditions(&s, false, RetestKind::Ordinary).is_ok());
        }
    }

    #[test]
    fn test_duplicate_rerun() {
        let s = source(SampleState::Tested);
        assert_eq!(
            check_retest_preconditions(&s, true, RetestKind::Ordinary),
            Err(LifecycleError::DuplicateRerun {
                identifier: "SRC".to_string()
            })
        );
    }

    #[test]
    fn test_source_is_retest() {
        let mut s = source(SampleState::Tested);
        s.is_retest = true;
        assert_eq!(
            check_retest_preconditions(&s, false, RetestKind::Ordinary),
            Err(LifecycleError::SourceIsRetest {
                identifier: "SRC".to_string()
            })
        );
    }

    #[test]
    fn test_posthoc_requires_commcomplete() {
        let s = source(SampleState::Communicated);
        assert_eq!(
            check_retest_preconditions(&s, false, RetestKind::Posthoc),
            Err(LifecycleError::NotEligibleForPosthocRetest {
                identifier: "SRC".to_string(),
                state: SampleState::Communicated,
            })
        );

        let settled = source(SampleState::Commcomplete);
        assert!(check_retest_preconditions(&settled, false, RetestKind::Posthoc).is_ok());
    }

    #[test]
    fn test_posthoc_check_order() {
        // Duplicate rerun is reported before the state check
        let mut s = source(SampleState::Received);
        assert!(matches!(
            check_retest_preconditions(&s, true, RetestKind::Posthoc),
            Err(LifecycleError::DuplicateRerun { .. })
        ));

        s.is_retest = true;
        assert!(matches!(
            check_retest_preconditions(&s, false, RetestKind::Posthoc),
            Err(LifecycleError::SourceIsRetest { .. })
        ));
    }

    #[test]
    fn test_retest_attributes_copy() {
        let s = source(SampleState::Analysed);
        let attrs = retest_attributes(&s, None);

        assert_eq!(attrs.identifier.as_deref(), Some("SRC"));
        assert_eq!(attrs.client, s.client);
        assert_eq!(attrs.state, SampleState::Received);
        assert!(attrs.is_retest);
        assert_eq!(attrs.placement, Some(Placement::plate_only("P7")));
        assert_eq!(attrs.control, s.control);
    }

    #[test]
    fn test_retest_attributes_unplaced_source() {
        let mut s = source(SampleState::Analysed);
        s.placement = None;
        assert_eq!(retest_attributes(&s, None).placement, None);
    }

    #[test]
    fn test_retest_attributes_client_override() {
        let s = source(SampleState::Commcomplete);
        let internal = ClientId::new();
        let attrs = retest_attributes(&s, Some(internal));
        assert_eq!(attrs.client, internal);
    }
}
