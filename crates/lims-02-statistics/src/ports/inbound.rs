//! Inbound Ports (Driving Ports / API)

use shared_types::ClientId;

use crate::domain::entities::{DailyCount, DailyRate, Stat};
use crate::domain::errors::StatisticsResult;

/// Read-only reporting API over the audit trail.
///
/// Reports with no data return placeholder rows instead of an empty list.
pub trait StatisticsApi: Send + Sync {
    /// Daily activity of one client, newest date first.
    fn stats_for(&self, client: ClientId) -> StatisticsResult<Vec<Stat>>;

    /// Samples created per day over the report window.
    fn requested_last_week(&self) -> StatisticsResult<Vec<DailyCount>>;

    /// Samples created per day over the report window that reached analysis.
    fn tested_last_week(&self) -> StatisticsResult<Vec<DailyCount>>;

    /// Rejected share of samples created per day over the report window.
    fn failure_rate_last_week(&self) -> StatisticsResult<Vec<DailyRate>>;

    /// All samples that reached analysis.
    fn total_tests(&self) -> StatisticsResult<u64>;
}
