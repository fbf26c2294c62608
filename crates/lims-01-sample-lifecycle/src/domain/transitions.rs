//! # Transition Table
//!
//! Which `(previous, target)` pairs the state machine accepts.
//!
//! | Rule | Pair |
//! |------|------|
//! | 1 | any → `rejected`, any → `retest` |
//! | 2 | `communicated` → `commfailed` |
//! | 3 | `commfailed` → `commcomplete` |
//! | 4 | `rejected` → `commcomplete` |
//! | 5 | `rejected` → `commfailed` |
//! | 6 | any pair exactly one ordinal apart, forwards |
//!
//! Rule 6 compares raw ordinals, so it also admits pairs such as
//! `commcomplete → commfailed` and `commfailed → rejected` that happen to be
//! adjacent in the encoding.

use shared_types::SampleState;

/// Whether moving from `previous` to `target` is legal.
///
/// Same-state requests are handled by the caller as no-ops and never reach
/// this table.
pub fn transition_allowed(previous: SampleState, target: SampleState) -> bool {
    use SampleState::*;

    match (previous, target) {
        // Rule 1
        (_, Rejected | Retest) => true,
        // Rule 2
        (Communicated, Commfailed) => true,
        // Rule 3
        (Commfailed, Commcomplete) => true,
        // Rules 4 and 5
        (Rejected, Commcomplete | Commfailed) => true,
        // Rule 6
        (
            Requested | Dispatched | Received | Preparing | Prepared | Tested | Analysed
            | Communicated | Commcomplete | Commfailed | Rejected | Retest,
            _,
        ) => previous.next() == Some(target),
    }
}

/// Every state reachable from `previous` in one accepted transition.
pub fn allowed_targets(previous: SampleState) -> Vec<SampleState> {
    SampleState::ALL
        .iter()
        .copied()
        .filter(|target| *target != previous && transition_allowed(previous, *target))
        .collect()
}
