//! Configuration for the Statistics Subsystem

use serde::{Deserialize, Serialize};
use std::env;

/// Statistics configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Days covered by the weekly reports, counted back from today
    pub window_days: u32,
    /// Undated zero rows returned when a report has no data
    pub placeholder_rows: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            placeholder_rows: 2,
        }
    }
}

impl StatisticsConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LIMS_STATS_WINDOW_DAYS`: Report window in days (default: 7)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_days: env::var("LIMS_STATS_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.window_days),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StatisticsConfig::default();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.placeholder_rows, 2);
    }
}
