//! # Shared Types Crate
//!
//! This crate contains the domain entities, the clock abstraction and the
//! audit-trail read port shared by the lifecycle and statistics subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Ordinal States**: `SampleState` carries the fixed ordinal encoding the
//!   transition rules and the reports depend on.
//! - **Read-only Reporting**: Statistics consume the audit trail only through
//!   [`AuditTrailReader`]; they never see the write side.

pub mod entities;
pub mod errors;
pub mod reporting;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use reporting::*;
pub use time::*;
