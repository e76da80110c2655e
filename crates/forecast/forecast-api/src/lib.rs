//! Forecast Consumer API
//!
//! Configuration types for the decomposition forecaster.
//!
//! This crate provides:
//! - `ForecastConfig`, the full set of model knobs with their defaults
//! - `SeasonalityConfig` for each seasonal component
//! - Re-exports from SPI for convenience

pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, ForecastError,
    ForecastRow, Forecaster, Result,
};

use serde::{Deserialize, Serialize};

/// Trend shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Growth {
    /// Piecewise-linear trend with changepoints
    #[default]
    Linear,
    /// Constant level
    Flat,
}

/// When a seasonal component is fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    /// Fitted when history covers at least two full periods
    Auto,
    Enabled,
    Disabled,
}

/// Configuration for one Fourier seasonal component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityConfig {
    pub mode: SeasonalityMode,
    /// Period in days
    pub period: f64,
    /// Number of sin/cos pairs
    pub fourier_order: usize,
}

impl SeasonalityConfig {
    pub fn yearly() -> Self {
        Self {
            mode: SeasonalityMode::Auto,
            period: 365.25,
            fourier_order: 10,
        }
    }

    pub fn weekly() -> Self {
        Self {
            mode: SeasonalityMode::Auto,
            period: 7.0,
            fourier_order: 3,
        }
    }

    pub fn daily() -> Self {
        Self {
            mode: SeasonalityMode::Enabled,
            period: 1.0,
            fourier_order: 4,
        }
    }

    pub fn disabled(self) -> Self {
        Self {
            mode: SeasonalityMode::Disabled,
            ..self
        }
    }

    /// Whether the component applies to a history spanning `span_days`
    pub fn is_active(&self, span_days: f64) -> bool {
        match self.mode {
            SeasonalityMode::Enabled => self.fourier_order > 0,
            SeasonalityMode::Disabled => false,
            SeasonalityMode::Auto => self.fourier_order > 0 && span_days >= 2.0 * self.period,
        }
    }
}

/// Configuration for the decomposition forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub growth: Growth,
    /// Number of potential trend changepoints
    pub n_changepoints: usize,
    /// Fraction of history in which changepoints are placed
    pub changepoint_range: f64,
    /// Laplace scale of changepoint magnitudes
    pub changepoint_prior_scale: f64,
    /// Normal scale of seasonal coefficients
    pub seasonality_prior_scale: f64,
    pub yearly: SeasonalityConfig,
    pub weekly: SeasonalityConfig,
    pub daily: SeasonalityConfig,
    /// Coverage of the uncertainty interval (e.g., 0.8 for 80%)
    pub interval_width: f64,
    /// Posterior predictive draws; 0 collapses the interval onto the estimate
    pub uncertainty_samples: usize,
    pub seed: u64,
    /// Floor estimate and bounds at zero
    pub clip_negative: bool,
    /// Wall-clock budget for fitting and sampling one series
    pub fit_timeout_ms: u64,
    pub max_iterations: usize,
    /// Convergence threshold on the largest coefficient change
    pub tolerance: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            growth: Growth::Linear,
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly: SeasonalityConfig::yearly(),
            weekly: SeasonalityConfig::weekly(),
            daily: SeasonalityConfig::daily(),
            interval_width: 0.8,
            uncertainty_samples: 1000,
            seed: 0,
            clip_negative: false,
            fit_timeout_ms: 30_000,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl ForecastConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_uncertainty_samples(mut self, samples: usize) -> Self {
        self.uncertainty_samples = samples;
        self
    }

    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = width;
        self
    }

    pub fn with_clip_negative(mut self, clip: bool) -> Self {
        self.clip_negative = clip;
        self
    }

    /// Reject values the model cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::invalid(
                "interval_width",
                format!("must be in (0, 1), got {}", self.interval_width),
            ));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::invalid(
                "changepoint_range",
                format!("must be in (0, 1], got {}", self.changepoint_range),
            ));
        }
        if !(self.changepoint_prior_scale > 0.0) {
            return Err(ForecastError::invalid(
                "changepoint_prior_scale",
                "must be positive",
            ));
        }
        if !(self.seasonality_prior_scale > 0.0) {
            return Err(ForecastError::invalid(
                "seasonality_prior_scale",
                "must be positive",
            ));
        }
        for (name, seasonality) in [
            ("yearly.period", &self.yearly),
            ("weekly.period", &self.weekly),
            ("daily.period", &self.daily),
        ] {
            if !(seasonality.period > 0.0) {
                return Err(ForecastError::invalid(name, "must be positive"));
            }
        }
        if self.max_iterations == 0 {
            return Err(ForecastError::invalid("max_iterations", "must be at least 1"));
        }
        if self.fit_timeout_ms == 0 {
            return Err(ForecastError::invalid("fit_timeout_ms", "must be at least 1"));
        }
        Ok(())
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, Growth, SeasonalityConfig, SeasonalityMode};
    pub use forecast_spi::{
        ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, ForecastError,
        ForecastRow, Forecaster, Result,
    };
}
