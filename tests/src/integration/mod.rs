//! Integration flows between the lifecycle, statistics and runtime crates.

pub mod flows;
pub mod runtime;
