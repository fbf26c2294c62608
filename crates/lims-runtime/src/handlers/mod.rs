//! # Event Handlers
//!
//! Bus consumers spawned by the runtime.

pub mod event_log;
pub mod notification;

pub use event_log::EventLogHandler;
pub use notification::NotificationHandler;
