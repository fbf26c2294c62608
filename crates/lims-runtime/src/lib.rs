//! # LIMS Runtime
//!
//! Wires the sample pipeline together and runs its background handlers.
//!
//! ## Modular Structure
//!
//! - `container/` - Subsystem container and runtime configuration
//! - `handlers/` - Event bus consumers
//!
//! ## Event Flow
//!
//! ```text
//! SampleLifecycleService ──commit──→ Event Bus
//!                                        │
//!                     ┌──────────────────┴──────────────────┐
//!                     ↓                                     ↓
//!           NotificationHandler                      EventLogHandler
//!       (ResultReady / SampleRejected)                 (all events)
//!                     │
//!                     ↓
//!           NotificationDispatcher
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (environment)
//! 2. Initialize telemetry
//! 3. Build the container
//! 4. Subscribe and spawn handlers
//! 5. Signal ready

pub mod container;
pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use shared_bus::{EventFilter, EventTopic};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::container::{LimsContainer, RuntimeConfig};
use crate::handlers::{EventLogHandler, NotificationHandler};

/// The runtime owning the container and its handler tasks.
pub struct LimsRuntime {
    /// Subsystem container with all initialized services.
    container: Arc<LimsContainer>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver, cloned into every handler.
    shutdown_rx: watch::Receiver<bool>,
    /// Spawned handler tasks.
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl LimsRuntime {
    /// Create a runtime with a freshly built container.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_container(LimsContainer::new(config))
    }

    /// Create a runtime around an existing container.
    pub fn with_container(container: LimsContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Shared container.
    pub fn container(&self) -> &Arc<LimsContainer> {
        &self.container
    }

    /// Subscribe and spawn the event handlers.
    ///
    /// Subscriptions are taken before this returns, so every event published
    /// afterwards reaches the handlers.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  LIMS Sample Pipeline v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let c = &self.container;

        let notifications = NotificationHandler::new(
            c.bus
                .subscribe(EventFilter::topics(vec![EventTopic::Notifications])),
            c.lifecycle.clone(),
            c.dispatcher.clone(),
        );
        let event_log = EventLogHandler::new(c.bus.subscribe(EventFilter::all()));

        let mut handles = self.handles.lock().await;
        handles.push(tokio::spawn(notifications.run(self.shutdown_rx.clone())));
        handles.push(tokio::spawn(event_log.run(self.shutdown_rx.clone())));

        info!(
            handlers = handles.len(),
            subscribers = c.bus.subscriber_count(),
            "Runtime started"
        );
        Ok(())
    }

    /// Signal shutdown and wait for every handler to stop.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if self.shutdown_tx.send(true).is_err() {
            warn!("No handler was listening for shutdown");
        }

        let handles = std::mem::take(&mut *self.handles.lock().await);
        for handle in handles {
            if let Err(err) = handle.await {
                warn!(error = %err, "Handler task ended abnormally");
            }
        }
        info!("Shutdown complete");
    }
}
