//! Configuration for the Sample Lifecycle Subsystem

use serde::{Deserialize, Serialize};
use std::env;

use crate::domain::client::INTERNAL_RERUN_CLIENT_NAME;

/// Lifecycle configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Publish result/rejection notification events
    pub notifications_enabled: bool,
    /// Reserved name of the client that owns posthoc retests
    pub internal_rerun_client_name: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            internal_rerun_client_name: INTERNAL_RERUN_CLIENT_NAME.to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LIMS_SEND_TEST_RESULTS`: Enable notifications (default: false)
    /// - `LIMS_INTERNAL_RERUN_CLIENT`: Internal client name
    pub fn from_env() -> Self {
        Self {
            notifications_enabled: env::var("LIMS_SEND_TEST_RESULTS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            internal_rerun_client_name: env::var("LIMS_INTERNAL_RERUN_CLIENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| INTERNAL_RERUN_CLIENT_NAME.to_string()),
        }
    }

    /// Same configuration with notifications switched on or off.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
