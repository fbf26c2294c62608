//! # Event Log Handler
//!
//! Writes every bus event as one `EVENT_FLOW_JSON` log line.

use serde_json::json;
use shared_bus::{LifecycleEvent, Subscription};
use tokio::sync::watch;
use tracing::{info, warn};

/// Logs all lifecycle events as JSON.
pub struct EventLogHandler {
    subscription: Subscription,
}

impl EventLogHandler {
    /// Create a handler over an unfiltered subscription.
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until shutdown is signalled or the bus closes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            let next = tokio::select! {
                _ = shutdown.changed() => break,
                event = self.subscription.recv() => event,
            };

            let Some(event) = next else {
                break;
            };
            match event_line(&event) {
                Ok(line) => info!("EVENT_FLOW_JSON {}", line),
                Err(err) => warn!(event = event.name(), error = %err, "Event not serializable"),
            }
        }
    }
}

/// One JSON document describing `event`.
pub fn event_line(event: &LifecycleEvent) -> Result<String, serde_json::Error> {
    let line = json!({
        "event_type": event.name(),
        "topic": format!("{:?}", event.topic()),
        "sample": event.sample(),
        "payload": event,
    });
    serde_json::to_string(&line)
}
