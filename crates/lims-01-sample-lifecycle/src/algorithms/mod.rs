//! # Algorithms Module
//!
//! Pure lifecycle logic. Nothing here touches storage or the bus.

pub mod rerun;
pub mod state_machine;

pub use rerun::{check_retest_preconditions, retest_attributes};
pub use state_machine::{apply_transition, creation_record, TransitionOutcome};
