//! # Creation-Date Reports
//!
//! Weekly counts over sample summaries, grouped by the UTC date a sample
//! was created. Callers pass summaries already restricted to the window.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use shared_types::{SampleState, SampleSummary};
use std::collections::BTreeMap;

use crate::domain::entities::{DailyCount, DailyRate};

/// Start of the day `window_days` before `now`.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    let day = now.date_naive() - Days::new(u64::from(window_days));
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Whether a sample has reached analysis.
pub fn reached_analysis(state: SampleState) -> bool {
    state >= SampleState::Analysed
}

/// Samples per creation date, newest first.
pub fn counts_by_date<'a>(
    summaries: impl IntoIterator<Item = &'a SampleSummary>,
    placeholder_rows: usize,
) -> Vec<DailyCount> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for summary in summaries {
        *by_date.entry(summary.created_at.date_naive()).or_default() += 1;
    }

    if by_date.is_empty() {
        return vec![DailyCount::placeholder(); placeholder_rows];
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, count)| DailyCount {
            date: Some(date),
            count,
        })
        .collect()
}

/// Rejected share of the samples created each date, newest first.
pub fn failure_rates<'a>(
    summaries: impl IntoIterator<Item = &'a SampleSummary>,
    placeholder_rows: usize,
) -> Vec<DailyRate> {
    // (rejected, total)
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for summary in summaries {
        let slot = by_date.entry(summary.created_at.date_naive()).or_default();
        if summary.state == SampleState::Rejected {
            slot.0 += 1;
        }
        slot.1 += 1;
    }

    if by_date.is_empty() {
        return vec![DailyRate::placeholder(); placeholder_rows];
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, (rejected, total))| DailyRate {
            date: Some(date),
            rate: rejected as f64 / total as f64,
        })
        .collect()
}

/// Number of samples that have reached analysis.
pub fn count_reaching_analysis<'a>(summaries: impl IntoIterator<Item = &'a SampleSummary>) -> u64 {
    summaries
        .into_iter()
        .filter(|s| reached_analysis(s.state))
        .count() as u64
}
