//! Ports for the Sample Lifecycle (hexagonal architecture)

pub mod inbound;
pub mod outbound;
