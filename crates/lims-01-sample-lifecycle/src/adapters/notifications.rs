//! Notification dispatchers
//!
//! The payload format of real deliveries is owned elsewhere; these adapters
//! cover local runs and tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{Actor, SampleId};
use tracing::info;

use crate::domain::errors::NotificationError;
use crate::domain::sample::Sample;
use crate::ports::outbound::NotificationDispatcher;

/// Logs each notification instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn notify_result(&self, sample: &Sample, actor: &Actor) -> Result<(), NotificationError> {
        info!(
            sample = %sample.id,
            identifier = %sample.identifier,
            client = %sample.client,
            actor = %actor,
            "Result notification"
        );
        Ok(())
    }

    async fn notify_rejection(
        &self,
        sample: &Sample,
        actor: &Actor,
    ) -> Result<(), NotificationError> {
        info!(
            sample = %sample.id,
            identifier = %sample.identifier,
            client = %sample.client,
            actor = %actor,
            "Rejection notification"
        );
        Ok(())
    }
}

/// Kind of a dispatched notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Result,
    Rejection,
}

/// One notification seen by [`RecordingNotificationDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentNotification {
    pub kind: NotificationKind,
    pub sample: SampleId,
    pub identifier: String,
    pub actor: Actor,
}

/// Keeps every notification in memory; optionally fails each delivery
/// after recording it.
#[derive(Debug, Default)]
pub struct RecordingNotificationDispatcher {
    sent: Mutex<Vec<SentNotification>>,
    fail: bool,
}

impl RecordingNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher whose deliveries all report failure.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of everything dispatched so far.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().clone()
    }

    fn record(
        &self,
        kind: NotificationKind,
        sample: &Sample,
        actor: &Actor,
    ) -> Result<(), NotificationError> {
        self.sent.lock().push(SentNotification {
            kind,
            sample: sample.id,
            identifier: sample.identifier.clone(),
            actor: actor.clone(),
        });

        if self.fail {
            return Err(NotificationError::Delivery(format!(
                "{kind:?} for {} refused",
                sample.identifier
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn notify_result(&self, sample: &Sample, actor: &Actor) -> Result<(), NotificationError> {
        self.record(NotificationKind::Result, sample, actor)
    }

    async fn notify_rejection(
        &self,
        sample: &Sample,
        actor: &Actor,
    ) -> Result<(), NotificationError> {
        self.record(NotificationKind::Rejection, sample, actor)
    }
}
