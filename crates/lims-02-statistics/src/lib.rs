//! # LIMS-02: Statistics Subsystem
//!
//! Derives per-client daily counts and weekly laboratory reports from the
//! audit trail.
//!
//! ## Architecture
//!
//! - **Domain**: `Stat`, `DailyCount`, `DailyRate`, `DayActivity`
//! - **Algorithms**: audit trail classification, creation-date reports
//! - **Ports**: Inbound (`StatisticsApi`) and Outbound (`AuditTrailReader`,
//!   `Clock` from `shared-types`)
//! - **Service**: `StatisticsService`
//!
//! Nothing here writes. Results may lag in-flight lifecycle writes.

pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::StatisticsConfig;
pub use domain::*;
pub use ports::inbound::StatisticsApi;
pub use service::StatisticsService;
