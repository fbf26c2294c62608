//! # Notification Handler
//!
//! Forwards `ResultReady` and `SampleRejected` events to the notification
//! dispatcher.
//!
//! Delivery is fire-and-forget: the transition that produced the event has
//! already committed, so failures are logged and never retried here.
//! Clients that opted out of notifications (`notify == false`) are skipped.

use std::sync::Arc;

use lims_01_sample_lifecycle::{NotificationDispatcher, SampleLifecycleApi};
use lims_telemetry::log_sample_event;
use shared_bus::{LifecycleEvent, Subscription};
use shared_types::{Actor, SampleId};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What a handled event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The dispatcher accepted the notification.
    Sent,
    /// The dispatcher reported a failure.
    Failed,
    /// The owning client does not want notifications.
    OptedOut,
    /// Not a notification event, or the sample is gone.
    Ignored,
}

/// Handler for notification events.
pub struct NotificationHandler {
    /// Subscription filtered to notification events.
    subscription: Subscription,
    /// Used to load the sample and its client.
    lifecycle: Arc<dyn SampleLifecycleApi>,
    /// Delivery target.
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl NotificationHandler {
    /// Create a new handler.
    pub fn new(
        subscription: Subscription,
        lifecycle: Arc<dyn SampleLifecycleApi>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            subscription,
            lifecycle,
            dispatcher,
        }
    }

    /// Run until shutdown is signalled or the bus closes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("[lims-01] Notification handler started");

        loop {
            let next = tokio::select! {
                _ = shutdown.changed() => break,
                event = self.subscription.recv() => event,
            };

            let Some(event) = next else {
                info!("[lims-01] Event bus closed, notification handler exiting");
                break;
            };
            self.handle_event(&event).await;
        }

        info!("[lims-01] Notification handler stopped");
    }

    /// Dispatch one event.
    pub async fn handle_event(&self, event: &LifecycleEvent) -> Delivery {
        let (id, actor, rejection) = match event {
            LifecycleEvent::ResultReady { sample, actor, .. } => (*sample, actor, false),
            LifecycleEvent::SampleRejected { sample, actor, .. } => (*sample, actor, true),
            _ => return Delivery::Ignored,
        };

        self.deliver(id, actor, rejection).await
    }

    async fn deliver(&self, id: SampleId, actor: &Actor, rejection: bool) -> Delivery {
        let sample = match self.lifecycle.sample(id) {
            Ok(sample) => sample,
            Err(err) => {
                warn!(sample = %id, error = %err, "Notification target unavailable");
                return Delivery::Ignored;
            }
        };

        if let Ok(Some(client)) = self.lifecycle.client(sample.client) {
            if !client.notify {
                debug!(sample = %id, client = %client.id, "Client opted out of notifications");
                return Delivery::OptedOut;
            }
        }

        let result = if rejection {
            self.dispatcher.notify_rejection(&sample, actor).await
        } else {
            self.dispatcher.notify_result(&sample, actor).await
        };

        match result {
            Ok(()) => {
                log_sample_event!(
                    info,
                    "Notification dispatched",
                    sample.id,
                    sample.identifier,
                    rejection = rejection,
                    actor = %actor
                );
                Delivery::Sent
            }
            Err(err) => {
                log_sample_event!(
                    warn,
                    "Notification delivery failed",
                    sample.id,
                    sample.identifier,
                    rejection = rejection,
                    error = %err
                );
                Delivery::Failed
            }
        }
    }
}
