//! Structured logging.
//!
//! Installs a global `tracing` subscriber: registry, `EnvFilter` and one fmt
//! layer, JSON or human readable. Log lines carry consistent fields so they
//! can be filtered per sample:
//! - `sample`: internal sample key
//! - `identifier`: externally visible sample code
//! - `from` / `to`: states of a transition
//! - `actor`: who caused the change

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter for `config`.
pub(crate) fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
pub(crate) fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()));
    }

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))
}

/// Log a sample-related event with the standard fields.
///
/// ```rust,ignore
/// use lims_telemetry::log_sample_event;
///
/// log_sample_event!(info, "Sample transitioned", sample.id, sample.identifier, to = %state);
/// ```
#[macro_export]
macro_rules! log_sample_event {
    ($level:ident, $msg:expr, $sample:expr, $identifier:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            sample = %$sample,
            identifier = %$identifier,
            $($($field)*,)?
            $msg
        )
    };
}
