//! Domain invariants for the Sample Lifecycle
//!
//! Checks over committed data. Adapters and tests use them to assert the
//! store never holds a state the service could not have produced.

use shared_types::{Record, SampleState};
use std::collections::HashSet;

use super::rerun::Rerun;
use super::sample::{Sample, API_ORIGIN_NOTE, CREATION_NOTE};

/// INVARIANT-1: Creation Record
/// The first record of a sample carries its initial state and a creation note.
pub fn invariant_history_starts_with_creation(records: &[Record]) -> bool {
    match records.first() {
        Some(first) => matches!(
            first.note.as_deref(),
            Some(CREATION_NOTE) | Some(API_ORIGIN_NOTE)
        ),
        None => false,
    }
}

/// INVARIANT-2: History Matches State
/// The most recent record names the sample's current state.
pub fn invariant_history_matches_state(sample: &Sample, records: &[Record]) -> bool {
    records
        .last()
        .map(|last| last.sample == sample.id && last.state == sample.state)
        .unwrap_or(false)
}

/// INVARIANT-3: Unique Identifier
/// No two samples share `(identifier, is_retest)`.
pub fn invariant_unique_identifiers<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> bool {
    let mut seen = HashSet::new();
    samples
        .into_iter()
        .all(|s| seen.insert((s.identifier.as_str(), s.is_retest)))
}

/// INVARIANT-4: Single Rerun
/// A source sample has at most one rerun.
pub fn invariant_single_rerun_per_source<'a>(reruns: impl IntoIterator<Item = &'a Rerun>) -> bool {
    let mut seen = HashSet::new();
    reruns.into_iter().all(|r| seen.insert(r.source))
}

/// INVARIANT-5: Retest Shape
/// A retest shares its source's identifier, is flagged, and its source sits
/// in `retest`.
pub fn invariant_retest_linked(source: &Sample, retest: &Sample) -> bool {
    retest.is_retest && retest.identifier == source.identifier && source.state == SampleState::Retest
}
