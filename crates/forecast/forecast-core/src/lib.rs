//! Forecast Core
//!
//! Additive decomposition forecasting: a piecewise-linear trend plus
//! Fourier seasonalities, fitted at the MAP estimate, with uncertainty
//! intervals from posterior predictive simulation.

pub mod confidence;
pub mod deadline;
pub mod forecaster;
pub mod linalg;
pub mod model;
pub mod sampling;
pub mod seasonality;
pub mod trend;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, ForecastError,
    ForecastRow, Forecaster, Result, MIN_POINTS,
};

// Re-export main types
pub use confidence::QuantileIntervalComputer;
pub use deadline::Deadline;
pub use forecaster::{forecast, DecompositionForecaster};
pub use model::DecompositionModel;
pub use seasonality::Component;
pub use trend::Trend;
