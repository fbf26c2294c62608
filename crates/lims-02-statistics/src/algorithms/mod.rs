//! Pure report algorithms. No I/O; inputs come from the audit trail port.

pub mod classification;
pub mod reports;

pub use classification::{daily_stats, group_activity};
pub use reports::{
    count_reaching_analysis, counts_by_date, failure_rates, reached_analysis, window_start,
};
