//! # Runtime Configuration
//!
//! Unified configuration for both subsystems and the runtime itself.

use lims_01_sample_lifecycle::LifecycleConfig;
use lims_02_statistics::StatisticsConfig;
use lims_telemetry::TelemetryConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::env;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Sample lifecycle configuration.
    pub lifecycle: LifecycleConfig,
    /// Statistics configuration.
    pub statistics: StatisticsConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Event bus channel capacity.
    pub event_channel_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleConfig::default(),
            statistics: StatisticsConfig::default(),
            telemetry: TelemetryConfig::default(),
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Load every section from the environment.
    ///
    /// `LIMS_EVENT_CHANNEL_CAPACITY` sets the bus capacity; the other
    /// variables are documented on each section's `from_env`.
    pub fn from_env() -> Self {
        Self {
            lifecycle: LifecycleConfig::from_env(),
            statistics: StatisticsConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
            event_channel_capacity: env::var("LIMS_EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        }
    }
}
