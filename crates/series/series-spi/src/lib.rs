//! Series Service Provider Interface
//!
//! Gap-free daily count series, one per skill, shared between the
//! aggregation stage and the forecast engine.

pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use error::{Result, SeriesError};
pub use model::{DailyCount, DailySeries};
