//! # Audit Trail Classification
//!
//! Rebuilds per-day client activity from raw audit entries.
//!
//! ## Steps
//!
//! 1. Drop control samples and records outside [`COUNTED_STATES`].
//! 2. Group by (UTC date of the record, sample), collecting distinct states
//!    and notes.
//! 3. Classify each group and sum per date.
//! 4. Order by date, newest first.

use chrono::NaiveDate;
use shared_types::{AuditEntry, SampleId};
use std::collections::BTreeMap;

use crate::domain::entities::{DayActivity, Stat, COUNTED_STATES};

/// Group counted entries by day and sample, in (date, sample) order.
pub fn group_activity<'a>(entries: impl IntoIterator<Item = &'a AuditEntry>) -> Vec<DayActivity> {
    let mut groups: BTreeMap<(NaiveDate, SampleId), DayActivity> = BTreeMap::new();

    for entry in entries {
        if entry.control || !COUNTED_STATES.contains(&entry.state) {
            continue;
        }

        let date = entry.recorded_at.date_naive();
        let activity = groups
            .entry((date, entry.sample))
            .or_insert_with(|| DayActivity::new(date, entry.sample));
        activity.states.insert(entry.state);
        if let Some(note) = &entry.note {
            activity.notes.insert(note.clone());
        }
    }

    groups.into_values().collect()
}

/// One `Stat` per active date, newest first.
///
/// With nothing to report, returns `placeholder_rows` undated zero rows.
pub fn daily_stats<'a>(
    entries: impl IntoIterator<Item = &'a AuditEntry>,
    placeholder_rows: usize,
) -> Vec<Stat> {
    let mut by_date: BTreeMap<NaiveDate, Stat> = BTreeMap::new();

    for activity in group_activity(entries) {
        by_date
            .entry(activity.date)
            .or_insert_with(|| Stat::empty(activity.date))
            .absorb(&activity);
    }

    if by_date.is_empty() {
        return vec![Stat::placeholder(); placeholder_rows];
    }

    by_date.into_values().rev().collect()
}
