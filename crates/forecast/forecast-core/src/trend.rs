//! Piecewise-linear and flat trend terms
//!
//! Time is scaled so the first observed day is `t = 0` and the last is
//! `t = 1`. Linear parameters are laid out as `[m, k, δ_1, ..., δ_C]`;
//! a flat trend has the single parameter `[m]`.

use forecast_api::Growth;

/// Trend term of the decomposition model
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    growth: Growth,
    changepoints: Vec<f64>,
}

impl Trend {
    /// Build a trend for a history of `history_len` evenly spaced days
    pub fn new(
        growth: Growth,
        history_len: usize,
        n_changepoints: usize,
        changepoint_range: f64,
    ) -> Self {
        let changepoints = match growth {
            Growth::Linear => changepoint_positions(history_len, n_changepoints, changepoint_range),
            Growth::Flat => Vec::new(),
        };
        Self {
            growth,
            changepoints,
        }
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// Scaled times of the potential rate changes
    pub fn changepoints(&self) -> &[f64] {
        &self.changepoints
    }

    pub fn n_params(&self) -> usize {
        match self.growth {
            Growth::Linear => 2 + self.changepoints.len(),
            Growth::Flat => 1,
        }
    }

    /// Index range of the changepoint deltas within the parameter vector
    pub fn delta_range(&self) -> std::ops::Range<usize> {
        match self.growth {
            Growth::Linear => 2..2 + self.changepoints.len(),
            Growth::Flat => 1..1,
        }
    }

    /// Append the design-matrix columns for scaled time `t`
    pub fn write_features(&self, t: f64, out: &mut Vec<f64>) {
        out.push(1.0);
        if self.growth == Growth::Linear {
            out.push(t);
            out.extend(self.changepoints.iter().map(|&s| (t - s).max(0.0)));
        }
    }

    /// Trend value at scaled time `t`
    pub fn evaluate(&self, params: &[f64], t: f64) -> f64 {
        match self.growth {
            Growth::Flat => params[0],
            Growth::Linear => {
                let deltas = &params[self.delta_range()];
                params[0]
                    + params[1] * t
                    + self
                        .changepoints
                        .iter()
                        .zip(deltas)
                        .map(|(&s, &delta)| delta * (t - s).max(0.0))
                        .sum::<f64>()
            }
        }
    }

    /// Trend value with additional `(position, delta)` rate changes applied
    pub fn evaluate_with(&self, params: &[f64], t: f64, extra: &[(f64, f64)]) -> f64 {
        let base = self.evaluate(params, t);
        if self.growth == Growth::Flat {
            return base;
        }
        base + extra
            .iter()
            .map(|&(s, delta)| delta * (t - s).max(0.0))
            .sum::<f64>()
    }
}

/// Scaled changepoint times spread over the first `range` of history.
///
/// Uses `min(n_changepoints, floor(len · range) - 1)` points at rounded,
/// evenly spaced row indices, excluding the first row.
pub fn changepoint_positions(history_len: usize, n_changepoints: usize, range: f64) -> Vec<f64> {
    if history_len < 2 {
        return Vec::new();
    }
    let hist_size = ((history_len as f64) * range).floor() as usize;
    let count = n_changepoints.min(hist_size.saturating_sub(1));
    if count == 0 {
        return Vec::new();
    }

    let last_row = (history_len - 1) as f64;
    let step = (hist_size - 1) as f64 / count as f64;
    (1..=count)
        .map(|j| (j as f64 * step).round() / last_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_has_no_changepoints() {
        assert!(changepoint_positions(2, 25, 0.8).is_empty());
        assert!(changepoint_positions(1, 25, 0.8).is_empty());
    }

    #[test]
    fn test_changepoint_count_is_capped_by_history() {
        // floor(10 * 0.8) - 1 = 7
        let cps = changepoint_positions(10, 25, 0.8);
        assert_eq!(cps.len(), 7);
        assert_eq!(cps[0], 1.0 / 9.0);
        assert_eq!(cps[6], 7.0 / 9.0);
    }

    #[test]
    fn test_changepoints_stay_in_range() {
        let cps = changepoint_positions(365, 25, 0.8);
        assert_eq!(cps.len(), 25);
        assert!(cps.windows(2).all(|w| w[0] < w[1]));
        assert!(cps.iter().all(|&s| s > 0.0 && s <= 0.8));
    }

    #[test]
    fn test_linear_trend_features_and_evaluation() {
        let trend = Trend::new(Growth::Linear, 10, 1, 0.8);
        assert_eq!(trend.n_params(), 3);
        assert_eq!(trend.delta_range(), 2..3);

        let mut row = Vec::new();
        trend.write_features(1.0, &mut row);
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], 1.0);
        assert_eq!(row[1], 1.0);

        // m = 1, k = 2, no rate change
        assert_eq!(trend.evaluate(&[1.0, 2.0, 0.0], 0.5), 2.0);
    }

    #[test]
    fn test_extra_changepoints_bend_the_trend() {
        let trend = Trend::new(Growth::Linear, 2, 0, 0.8);
        let params = [0.0, 1.0];
        assert_eq!(trend.evaluate_with(&params, 2.0, &[(1.5, 2.0)]), 3.0);
        assert_eq!(trend.evaluate_with(&params, 1.0, &[(1.5, 2.0)]), 1.0);
    }

    #[test]
    fn test_flat_trend_is_constant() {
        let trend = Trend::new(Growth::Flat, 100, 25, 0.8);
        assert!(trend.changepoints().is_empty());
        assert_eq!(trend.n_params(), 1);
        assert_eq!(trend.evaluate(&[3.5], 0.0), 3.5);
        assert_eq!(trend.evaluate_with(&[3.5], 9.0, &[(1.0, 1.0)]), 3.5);
    }
}
