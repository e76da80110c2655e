//! Trait for confidence interval computation

use crate::model::ConfidenceInterval;

/// Trait for confidence interval computation
pub trait ConfidenceIntervalComputer: Send + Sync {
    /// Compute intervals around `forecast` from simulated draws.
    ///
    /// `samples[i]` holds every draw for position `i` of `forecast`.
    fn compute(
        &self,
        forecast: &[f64],
        samples: &[Vec<f64>],
        confidence_level: f64,
    ) -> ConfidenceInterval;
}
