//! Forecast row model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Predicted mention count for one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Central estimate
    pub estimate: f64,
    /// Lower bound of the uncertainty interval
    pub lower_bound: f64,
    /// Upper bound of the uncertainty interval
    pub upper_bound: f64,
}

impl ForecastRow {
    pub fn new(date: NaiveDate, estimate: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            date,
            estimate,
            lower_bound,
            upper_bound,
        }
    }

    /// Row with a zero-width interval
    pub fn point(date: NaiveDate, estimate: f64) -> Self {
        Self::new(date, estimate, estimate, estimate)
    }

    /// Floor estimate and bounds at zero
    pub fn clipped(self) -> Self {
        Self {
            estimate: self.estimate.max(0.0),
            lower_bound: self.lower_bound.max(0.0),
            upper_bound: self.upper_bound.max(0.0),
            ..self
        }
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}
