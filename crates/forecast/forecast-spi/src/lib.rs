//! Forecast Service Provider Interface
//!
//! Defines traits for demand forecasters and interval computation, and the
//! row, interval and decomposition types they exchange.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceIntervalComputer, Forecaster};
pub use error::{ForecastError, Result};
pub use model::{ConfidenceInterval, DecompositionResult, ForecastRow};

/// Fewest series points a trend can be estimated from
pub const MIN_POINTS: usize = 2;
