//! Adapters implementing the lifecycle's outbound ports.

pub mod identifiers;
pub mod memory_store;
pub mod notifications;
pub mod placement;

pub use identifiers::RandomIdentifierGenerator;
pub use memory_store::InMemorySampleStore;
pub use notifications::{
    LoggingNotificationDispatcher, NotificationKind, RecordingNotificationDispatcher,
    SentNotification,
};
pub use placement::SinglePlacementValidator;
