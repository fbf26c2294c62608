//! Ports for the Statistics Subsystem

pub mod inbound;
pub mod outbound;
