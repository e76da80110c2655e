//! Confidence interval implementations
//!
//! Turns simulated draws into empirical prediction intervals.

use forecast_spi::{ConfidenceInterval, ConfidenceIntervalComputer};

/// Empirical quantile interval computer
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileIntervalComputer;

impl QuantileIntervalComputer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for QuantileIntervalComputer {
    fn compute(
        &self,
        forecast: &[f64],
        samples: &[Vec<f64>],
        confidence_level: f64,
    ) -> ConfidenceInterval {
        empirical_interval(forecast, samples, confidence_level)
    }
}

/// Bounds at the `(1 ∓ level) / 2` quantiles of each row's draws.
///
/// Rows without draws collapse onto the point forecast.
pub fn empirical_interval(
    forecast: &[f64],
    samples: &[Vec<f64>],
    confidence_level: f64,
) -> ConfidenceInterval {
    let lower_q = (1.0 - confidence_level) / 2.0;
    let upper_q = (1.0 + confidence_level) / 2.0;

    let mut lower = Vec::with_capacity(forecast.len());
    let mut upper = Vec::with_capacity(forecast.len());
    let mut sorted = Vec::new();

    for (i, &point) in forecast.iter().enumerate() {
        match samples.get(i).filter(|draws| !draws.is_empty()) {
            Some(draws) => {
                sorted.clear();
                sorted.extend_from_slice(draws);
                sorted.sort_by(f64::total_cmp);
                lower.push(quantile(&sorted, lower_q));
                upper.push(quantile(&sorted, upper_q));
            }
            None => {
                lower.push(point);
                upper.push(point);
            }
        }
    }

    ConfidenceInterval {
        forecast: forecast.to_vec(),
        lower,
        upper,
        confidence_level,
    }
}

/// Linearly interpolated quantile of an ascending, non-empty slice
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * fraction
}
