//! Forecast Facade
//!
//! High-level API for skill demand forecasting. Re-exports all public types
//! from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{confidence, linalg, model, sampling, seasonality, trend};

// Re-export core types at root
pub use forecast_core::{
    forecast, Component, Deadline, DecompositionForecaster, DecompositionModel,
    QuantileIntervalComputer, Trend,
};

// Re-export SPI items not covered by the API
pub use forecast_spi::MIN_POINTS;
