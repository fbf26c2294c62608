//! # LIMS-01: Sample Lifecycle Subsystem
//!
//! Tracks laboratory samples through the fixed processing pipeline, from
//! intake to result communication.
//!
//! ## Architecture
//!
//! - **Domain**: `Sample`, `Client`, `Rerun`, the transition table and the
//!   explicit `ActorContext`
//! - **Algorithms**: state machine application, rerun preconditions and
//!   attribute capture
//! - **Ports**: Inbound (`SampleLifecycleApi`) and Outbound
//!   (`SampleRepository`, `UnitOfWork`, `IdentifierGenerator`,
//!   `WellPlacementValidator`, `NotificationDispatcher`)
//! - **Adapters**: in-memory store, random identifiers, placement check,
//!   logging/recording notification dispatchers
//! - **Service**: `SampleLifecycleService` orchestration
//!
//! ## Write Path
//!
//! Every mutation runs inside one unit of work. Events describing the change
//! are published on the shared bus only after the unit commits, so a failed
//! operation never leaks an event and a failed publish never undoes a write.

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    InMemorySampleStore, LoggingNotificationDispatcher, RandomIdentifierGenerator,
    RecordingNotificationDispatcher, SinglePlacementValidator,
};
pub use config::LifecycleConfig;
pub use domain::*;
pub use ports::inbound::SampleLifecycleApi;
pub use ports::outbound::{
    IdentifierGenerator, NotificationDispatcher, SampleRepository, UnitOfWork,
    WellPlacementValidator,
};
pub use service::SampleLifecycleService;
