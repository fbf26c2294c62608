//! # Report Rows
//!
//! `Stat` is one day of per-client activity. `DailyCount` and `DailyRate`
//! back the weekly creation-date reports.
//!
//! Rows with `date == None` are placeholders returned when there is nothing
//! to report, so charts always have something to draw.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{SampleId, SampleState};
use std::collections::BTreeSet;

/// Creation note written on samples requested through the API.
pub const API_REQUEST_NOTE: &str = "Created from API";

/// Record states the per-client statistics look at. Everything else in a
/// sample's history is ignored.
pub const COUNTED_STATES: [SampleState; 4] = [
    SampleState::Received,
    SampleState::Commcomplete,
    SampleState::Retest,
    SampleState::Rejected,
];

/// Per-day counts for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub date: Option<NaiveDate>,
    /// Samples received that were requested through the API.
    pub requested: u64,
    /// Samples completing communication without a rejection.
    pub communicated: u64,
    pub rejects: u64,
    /// Retests of samples that had not been communicated.
    pub retests: u64,
    /// Retests of samples already communicated (posthoc).
    pub internalchecks: u64,
}

impl Stat {
    /// Zero row for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Zero row without a date.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Add one sample's activity for the day.
    pub fn absorb(&mut self, activity: &DayActivity) {
        self.requested += u64::from(activity.is_requested());
        self.communicated += u64::from(activity.is_communicated());
        self.rejects += u64::from(activity.is_rejected());
        self.retests += u64::from(activity.is_retest());
        self.internalchecks += u64::from(activity.is_internal_check());
    }
}

/// Sample count for one creation date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: Option<NaiveDate>,
    pub count: u64,
}

impl DailyCount {
    /// Zero row without a date.
    pub fn placeholder() -> Self {
        Self::default()
    }
}

/// Fraction of samples created on a date that ended up rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRate {
    pub date: Option<NaiveDate>,
    pub rate: f64,
}

impl DailyRate {
    /// Zero row without a date.
    pub fn placeholder() -> Self {
        Self::default()
    }
}

/// Everything one sample did on one day: the distinct counted states it
/// entered and the notes written with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub sample: SampleId,
    pub states: BTreeSet<SampleState>,
    pub notes: BTreeSet<String>,
}

impl DayActivity {
    /// Empty activity for `sample` on `date`.
    pub fn new(date: NaiveDate, sample: SampleId) -> Self {
        Self {
            date,
            sample,
            states: BTreeSet::new(),
            notes: BTreeSet::new(),
        }
    }

    fn has(&self, state: SampleState) -> bool {
        self.states.contains(&state)
    }

    pub fn is_requested(&self) -> bool {
        self.has(SampleState::Received) && self.notes.contains(API_REQUEST_NOTE)
    }

    pub fn is_communicated(&self) -> bool {
        self.has(SampleState::Commcomplete) && !self.has(SampleState::Rejected)
    }

    pub fn is_rejected(&self) -> bool {
        self.has(SampleState::Rejected)
    }

    pub fn is_retest(&self) -> bool {
        self.has(SampleState::Retest)
            && !self.has(SampleState::Rejected)
            && !self.has(SampleState::Commcomplete)
    }

    pub fn is_internal_check(&self) -> bool {
        self.has(SampleState::Retest)
            && !self.has(SampleState::Rejected)
            && self.has(SampleState::Commcomplete)
    }
}
