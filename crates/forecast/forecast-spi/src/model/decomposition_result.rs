//! Decomposition result model

use serde::{Deserialize, Serialize};

/// Additive components of a fitted model, one entry per requested date.
///
/// Disabled seasonalities are all zeros; the components sum to the point
/// estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Trend component
    pub trend: Vec<f64>,
    /// Yearly seasonal component
    pub yearly: Vec<f64>,
    /// Weekly seasonal component
    pub weekly: Vec<f64>,
    /// Daily seasonal component
    pub daily: Vec<f64>,
}

impl DecompositionResult {
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Sum of all seasonal components at position `i`
    pub fn seasonal(&self, i: usize) -> f64 {
        self.yearly[i] + self.weekly[i] + self.daily[i]
    }

    /// Point estimate at position `i`
    pub fn total(&self, i: usize) -> f64 {
        self.trend[i] + self.seasonal(i)
    }
}
