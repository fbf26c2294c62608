//! # Subsystem Container
//!
//! Builds the shared infrastructure and both subsystem services, and hands
//! out `Arc`s to them.
//!
//! ## Initialization Order
//!
//! 1. Event bus and clock
//! 2. In-memory store (lifecycle writes, statistics reads)
//! 3. Sample lifecycle service
//! 4. Statistics service

pub mod config;

pub use config::RuntimeConfig;

use std::sync::Arc;

use lims_01_sample_lifecycle::{
    InMemorySampleStore, LoggingNotificationDispatcher, NotificationDispatcher,
    RandomIdentifierGenerator, SampleLifecycleService, SinglePlacementValidator,
};
use lims_02_statistics::StatisticsService;
use shared_bus::InMemoryEventBus;
use shared_types::{Clock, SystemClock};
use tracing::info;

/// All initialized services.
pub struct LimsContainer {
    /// Runtime configuration.
    pub config: RuntimeConfig,
    /// Shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Shared sample storage.
    pub store: Arc<InMemorySampleStore>,
    /// Time source for both subsystems.
    pub clock: Arc<dyn Clock>,
    /// Sample lifecycle (Subsystem 1).
    pub lifecycle: Arc<SampleLifecycleService>,
    /// Statistics (Subsystem 2).
    pub statistics: Arc<StatisticsService>,
    /// Target of result and rejection notifications.
    pub dispatcher: Arc<dyn NotificationDispatcher>,
}

impl LimsContainer {
    /// Build with the system clock and the logging dispatcher.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::build(
            config,
            Arc::new(SystemClock),
            Arc::new(LoggingNotificationDispatcher),
        )
    }

    /// Build with an explicit clock and dispatcher.
    pub fn build(
        config: RuntimeConfig,
        clock: Arc<dyn Clock>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_channel_capacity));
        let store = Arc::new(InMemorySampleStore::new());

        let lifecycle = Arc::new(SampleLifecycleService::new(
            store.clone(),
            Arc::new(RandomIdentifierGenerator::new()),
            Arc::new(SinglePlacementValidator),
            bus.clone(),
            clock.clone(),
            config.lifecycle.clone(),
        ));

        let statistics = Arc::new(StatisticsService::new(
            store.clone(),
            clock.clone(),
            config.statistics.clone(),
        ));

        info!(
            notifications = config.lifecycle.notifications_enabled,
            window_days = config.statistics.window_days,
            "Subsystem container initialized"
        );

        Self {
            config,
            bus,
            store,
            clock,
            lifecycle,
            statistics,
            dispatcher,
        }
    }
}
