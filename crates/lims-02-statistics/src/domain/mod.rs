//! Domain module for Statistics
//!
//! Report rows and the day/sample activity they are derived from.

pub mod entities;
pub mod errors;

pub use entities::{DailyCount, DailyRate, DayActivity, Stat, API_REQUEST_NOTE, COUNTED_STATES};
pub use errors::{StatisticsError, StatisticsResult};
