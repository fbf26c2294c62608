//! # Shared Bus - Event Bus for Sample Lifecycle Events
//!
//! The lifecycle subsystem publishes events here after its unit of work
//! commits. Consumers (the runtime's notification handler, tests, future
//! audit exporters) subscribe with a filter.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────────────┐
//! │  Lifecycle   │                    │ Notification Handler │
//! │   Service    │    publish()       │                      │
//! │              │ ──────┐            │                      │
//! └──────────────┘       │            └──────────────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publication is fire-and-forget: an event with no subscribers is dropped
//! and the publisher carries on.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LifecycleEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
