//! Outbound Ports (Driven Ports / SPI)
//!
//! Statistics reads through the shared `AuditTrailReader` and takes time from
//! the shared `Clock`.

pub use shared_types::{AuditTrailReader, Clock};
