//! Plate/well placement check

use shared_types::Placement;

use crate::domain::errors::{LifecycleError, LifecycleResult};
use crate::domain::sample::Sample;
use crate::ports::outbound::WellPlacementValidator;

/// A sample may sit in at most one well per plate.
///
/// Moving to another plate, re-placing into the same well, or taking a
/// first well on the plate the sample already sits on is fine. Moving to a
/// different well on the plate the sample is already on is a
/// `WellConflict`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePlacementValidator;

impl WellPlacementValidator for SinglePlacementValidator {
    fn validate_placement(&self, sample: &Sample, placement: &Placement) -> LifecycleResult<()> {
        match &sample.placement {
            Some(current)
                if current.plate == placement.plate
                    && current.well.is_some()
                    && current.well != placement.well =>
            {
                Err(LifecycleError::WellConflict {
                    identifier: sample.identifier.clone(),
                    plate: placement.plate.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::NewSample;
    use chrono::Utc;
    use shared_types::ClientId;

    fn placed(placement: Option<Placement>) -> Sample {
        let mut sample = Sample::from_new(
            NewSample::for_client(ClientId::new()),
            "W-1".to_string(),
            Utc::now(),
        );
        sample.placement = placement;
        sample
    }

    #[test]
    fn test_unplaced_sample_accepts_any_well() {
        let sample = placed(None);
        assert!(SinglePlacementValidator
            .validate_placement(&sample, &Placement::new("P1", "A1"))
            .is_ok());
    }

    #[test]
    fn test_other_well_same_plate_conflicts() {
        let sample = placed(Some(Placement::new("P1", "A1")));
        let err = SinglePlacementValidator
            .validate_placement(&sample, &Placement::new("P1", "B2"))
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::WellConflict {
                identifier: "W-1".to_string(),
                plate: "P1".to_string(),
            }
        );
    }

    #[test]
    fn test_same_well_or_other_plate_ok() {
        let sample = placed(Some(Placement::new("P1", "A1")));
        assert!(SinglePlacementValidator
            .validate_placement(&sample, &Placement::new("P1", "A1"))
            .is_ok());
        assert!(SinglePlacementValidator
            .validate_placement(&sample, &Placement::new("P2", "B2"))
            .is_ok());
    }

    #[test]
    fn test_plate_only_sample_takes_first_well() {
        let sample = placed(Some(Placement::plate_only("P1")));
        assert!(SinglePlacementValidator
            .validate_placement(&sample, &Placement::new("P1", "C4"))
            .is_ok());
    }
}
