//! Statistics Service
//!
//! Implements `StatisticsApi` by reading the audit trail port and handing
//! the snapshot to the pure algorithms. Reads never block lifecycle writers
//! for longer than the snapshot copy.

use shared_types::{ClientId, SampleSummary};
use std::sync::Arc;
use tracing::debug;

use crate::algorithms::{
    count_reaching_analysis, counts_by_date, daily_stats, failure_rates, reached_analysis,
    window_start,
};
use crate::config::StatisticsConfig;
use crate::domain::entities::{DailyCount, DailyRate, Stat};
use crate::domain::errors::StatisticsResult;
use crate::ports::inbound::StatisticsApi;
use crate::ports::outbound::{AuditTrailReader, Clock};

/// Statistics Service
pub struct StatisticsService {
    reader: Arc<dyn AuditTrailReader>,
    clock: Arc<dyn Clock>,
    config: StatisticsConfig,
}

impl StatisticsService {
    /// Create a new service.
    pub fn new(
        reader: Arc<dyn AuditTrailReader>,
        clock: Arc<dyn Clock>,
        config: StatisticsConfig,
    ) -> Self {
        Self {
            reader,
            clock,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    fn window(&self) -> StatisticsResult<Vec<SampleSummary>> {
        let since = window_start(self.clock.now(), self.config.window_days);
        let summaries = self.reader.sample_summaries_since(since)?;
        debug!(since = %since, samples = summaries.len(), "Report window loaded");
        Ok(summaries)
    }
}

impl StatisticsApi for StatisticsService {
    fn stats_for(&self, client: ClientId) -> StatisticsResult<Vec<Stat>> {
        let entries = self.reader.audit_entries_for_client(client)?;
        let stats = daily_stats(&entries, self.config.placeholder_rows);
        debug!(
            client = %client,
            entries = entries.len(),
            rows = stats.len(),
            "Client statistics computed"
        );
        Ok(stats)
    }

    fn requested_last_week(&self) -> StatisticsResult<Vec<DailyCount>> {
        let summaries = self.window()?;
        Ok(counts_by_date(&summaries, self.config.placeholder_rows))
    }

    fn tested_last_week(&self) -> StatisticsResult<Vec<DailyCount>> {
        let summaries = self.window()?;
        Ok(counts_by_date(
            summaries.iter().filter(|s| reached_analysis(s.state)),
            self.config.placeholder_rows,
        ))
    }

    fn failure_rate_last_week(&self) -> StatisticsResult<Vec<DailyRate>> {
        let summaries = self.window()?;
        Ok(failure_rates(&summaries, self.config.placeholder_rows))
    }

    fn total_tests(&self) -> StatisticsResult<u64> {
        let summaries = self.reader.sample_summaries()?;
        Ok(count_reaching_analysis(&summaries))
    }
}
