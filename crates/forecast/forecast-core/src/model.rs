//! Additive decomposition model
//!
//! `y(t) = trend(t) + yearly(t) + weekly(t) + daily(t) + ε`, fitted at the
//! maximum a posteriori estimate by iteratively reweighted penalized least
//! squares. Values are scaled by `max|y|` during fitting and unscaled on the
//! way out.

use chrono::NaiveDate;
use forecast_api::ForecastConfig;
use forecast_spi::{DecompositionResult, ForecastError, Result, MIN_POINTS};
use series_spi::DailySeries;
use tracing::debug;

use crate::deadline::Deadline;
use crate::linalg::{cholesky_solve, mat_vec, normal_equations};
use crate::seasonality::{active_seasonalities, days_since_epoch, Component, FourierSeasonality};
use crate::trend::Trend;

/// Prior variance of the trend offset and base rate
const TREND_PRIOR_VARIANCE: f64 = 25.0;
/// Lower bound on the scaled noise variance
const SIGMA2_FLOOR: f64 = 1e-4;
/// Lower bound on |δ| when reweighting the Laplace prior
const DELTA_FLOOR: f64 = 1e-6;

/// A fitted trend + seasonality model for one daily series
#[derive(Debug, Clone)]
pub struct DecompositionModel {
    config: ForecastConfig,
    start: NaiveDate,
    last: NaiveDate,
    history_len: usize,
    span_days: f64,
    y_scale: f64,
    trend: Trend,
    seasonalities: Vec<FourierSeasonality>,
    params: Vec<f64>,
    sigma: f64,
    iterations: usize,
}

impl DecompositionModel {
    /// Fit a model under the configured time budget
    pub fn fit(series: &DailySeries, config: &ForecastConfig) -> Result<Self> {
        let deadline = Deadline::after_millis(config.fit_timeout_ms);
        Self::fit_within(series, config, &deadline)
    }

    /// Fit a model, checking `deadline` between solver iterations
    pub fn fit_within(
        series: &DailySeries,
        config: &ForecastConfig,
        deadline: &Deadline,
    ) -> Result<Self> {
        config.validate()?;
        let (start, last) = match (series.first_date(), series.last_date()) {
            (Some(start), Some(last)) if series.len() >= MIN_POINTS => (start, last),
            _ => {
                return Err(ForecastError::InsufficientData {
                    required: MIN_POINTS,
                    actual: series.len(),
                })
            }
        };

        let values = series.values();
        let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
        let y: Vec<f64> = values.iter().map(|v| v / y_scale).collect();

        let span_days = (last - start).num_days() as f64;
        let history_len = series.len();
        let trend = Trend::new(
            config.growth,
            history_len,
            config.n_changepoints,
            config.changepoint_range,
        );
        let seasonalities = active_seasonalities(config, span_days);

        let mut model = Self {
            config: config.clone(),
            start,
            last,
            history_len,
            span_days,
            y_scale,
            trend,
            seasonalities,
            params: Vec::new(),
            sigma: 0.0,
            iterations: 0,
        };

        let dates: Vec<NaiveDate> = series.dates().collect();
        let design = model.design_matrix(&dates);
        model.estimate(&design, &y, deadline)?;

        debug!(
            skill = %series.skill(),
            points = history_len,
            changepoints = model.trend.changepoints().len(),
            seasonalities = model.seasonalities.len(),
            iterations = model.iterations,
            "model fitted"
        );
        Ok(model)
    }

    fn estimate(&mut self, design: &[f64], y: &[f64], deadline: &Deadline) -> Result<()> {
        let cols = self.n_params();
        let (xtx, xty) = normal_equations(design, y, cols);
        let n = y.len() as f64;
        let mean = y.iter().sum::<f64>() / n;
        let mut sigma2 = (y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).max(SIGMA2_FLOOR);

        let trend_params = self.trend.n_params();
        let deltas = self.trend.delta_range();
        let tau = self.config.changepoint_prior_scale;
        let seasonal_variance = self.config.seasonality_prior_scale.powi(2);

        let mut current: Option<Vec<f64>> = None;
        for iteration in 1..=self.config.max_iterations {
            deadline.check("fit")?;

            let mut system = xtx.clone();
            for i in 0..cols {
                let precision = if deltas.contains(&i) {
                    match &current {
                        Some(params) => 1.0 / (tau * params[i].abs().max(DELTA_FLOOR)),
                        None => 1.0 / (tau * tau),
                    }
                } else if i < trend_params {
                    1.0 / TREND_PRIOR_VARIANCE
                } else {
                    1.0 / seasonal_variance
                };
                system[i * cols + i] += sigma2 * precision;
            }

            let next = cholesky_solve(&system, &xty, cols)?;
            let fitted = mat_vec(design, &next, cols);
            let rss: f64 = fitted.iter().zip(y).map(|(f, v)| (v - f).powi(2)).sum();
            // MAP of σ² under a half-normal(0, 0.5) prior on σ
            sigma2 = ((-n + (n * n + 16.0 * rss).sqrt()) / 8.0).max(SIGMA2_FLOOR);

            let change = current
                .as_ref()
                .map(|prev| {
                    prev.iter()
                        .zip(&next)
                        .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()))
                })
                .unwrap_or(f64::INFINITY);
            current = Some(next);
            self.iterations = iteration;
            if change < self.config.tolerance {
                break;
            }
        }

        self.params = current.ok_or_else(|| {
            ForecastError::NumericalError("solver ran no iterations".to_string())
        })?;
        self.sigma = sigma2.sqrt();
        Ok(())
    }

    fn n_params(&self) -> usize {
        self.trend.n_params()
            + self
                .seasonalities
                .iter()
                .map(FourierSeasonality::n_params)
                .sum::<usize>()
    }

    fn design_matrix(&self, dates: &[NaiveDate]) -> Vec<f64> {
        let mut design = Vec::with_capacity(dates.len() * self.n_params());
        for &date in dates {
            self.trend.write_features(self.scaled_time(date), &mut design);
            let day = days_since_epoch(date);
            for seasonality in &self.seasonalities {
                seasonality.write_features(day, &mut design);
            }
        }
        design
    }

    /// Days since the first observation, with the last observation at 1
    pub fn scaled_time(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 / self.span_days
    }

    /// Per-date additive components in original units
    pub fn components(&self, dates: &[NaiveDate]) -> DecompositionResult {
        let mut result = DecompositionResult {
            trend: Vec::with_capacity(dates.len()),
            yearly: vec![0.0; dates.len()],
            weekly: vec![0.0; dates.len()],
            daily: vec![0.0; dates.len()],
        };
        let mut features = Vec::new();

        for (i, &date) in dates.iter().enumerate() {
            result
                .trend
                .push(self.trend.evaluate(&self.params, self.scaled_time(date)) * self.y_scale);

            let day = days_since_epoch(date);
            let mut offset = self.trend.n_params();
            for seasonality in &self.seasonalities {
                features.clear();
                seasonality.write_features(day, &mut features);
                let width = seasonality.n_params();
                let value: f64 = features
                    .iter()
                    .zip(&self.params[offset..offset + width])
                    .map(|(x, beta)| x * beta)
                    .sum::<f64>()
                    * self.y_scale;
                offset += width;

                let target = match seasonality.component {
                    Component::Yearly => &mut result.yearly,
                    Component::Weekly => &mut result.weekly,
                    Component::Daily => &mut result.daily,
                };
                target[i] += value;
            }
        }
        result
    }

    /// Point estimates in original units
    pub fn predict(&self, dates: &[NaiveDate]) -> Vec<f64> {
        let components = self.components(dates);
        (0..components.len()).map(|i| components.total(i)).collect()
    }

    /// Every observed day, in order
    pub fn history_dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.history_len)
    }

    /// The `horizon` days following the last observation
    pub fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        self.last.iter_days().skip(1).take(horizon).collect()
    }

    pub fn trend(&self) -> &Trend {
        &self.trend
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Fitted changepoint rate changes, in scaled units
    pub fn deltas(&self) -> &[f64] {
        &self.params[self.trend.delta_range()]
    }

    pub fn y_scale(&self) -> f64 {
        self.y_scale
    }

    /// Observation noise standard deviation in original units
    pub fn noise_scale(&self) -> f64 {
        self.sigma * self.y_scale
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn span_days(&self) -> f64 {
        self.span_days
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn seasonal_components(&self) -> Vec<Component> {
        self.seasonalities.iter().map(|s| s.component).collect()
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn linear_series(days: u32) -> DailySeries {
        let counts: Vec<u32> = (0..days).map(|i| 10 + 2 * i).collect();
        DailySeries::from_counts("rust", start(), &counts)
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let series = DailySeries::from_counts("rust", start(), &[3]);
        let result = DecompositionModel::fit(&series, &ForecastConfig::default());
        assert_eq!(
            result.unwrap_err(),
            ForecastError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_linear_series_is_recovered() {
        let series = linear_series(60);
        let model = DecompositionModel::fit(&series, &ForecastConfig::default()).unwrap();

        let dates: Vec<NaiveDate> = model.history_dates().collect();
        let fitted = model.predict(&dates);
        for (actual, estimate) in series.values().iter().zip(&fitted) {
            assert!((actual - estimate).abs() < 1.0, "{} vs {}", actual, estimate);
        }

        let future = model.future_dates(10);
        let ahead = model.predict(&future);
        assert!((ahead[9] - 148.0).abs() < 2.0, "got {}", ahead[9]);
    }

    #[test]
    fn test_future_dates_follow_last_observation() {
        let series = linear_series(5);
        let model = DecompositionModel::fit(&series, &ForecastConfig::default()).unwrap();
        let future = model.future_dates(3);
        assert_eq!(
            future,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            ]
        );
        assert!(model.future_dates(0).is_empty());
    }

    #[test]
    fn test_components_sum_to_prediction() {
        let series = linear_series(30);
        let model = DecompositionModel::fit(&series, &ForecastConfig::default()).unwrap();
        let dates: Vec<NaiveDate> = model.history_dates().chain(model.future_dates(7)).collect();

        let components = model.components(&dates);
        let predicted = model.predict(&dates);
        assert_eq!(components.len(), dates.len());
        assert!(components.yearly.iter().all(|&v| v == 0.0));
        for (i, value) in predicted.iter().enumerate() {
            assert!((components.total(i) - value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_weekly_pattern_is_learned() {
        // Weekdays busy, weekends quiet; 2024-01-01 is a Monday
        let counts: Vec<u32> = (0..56).map(|i| if i % 7 < 5 { 10 } else { 2 }).collect();
        let series = DailySeries::from_counts("sql", start(), &counts);
        let model = DecompositionModel::fit(&series, &ForecastConfig::default()).unwrap();
        assert!(model.seasonal_components().contains(&Component::Weekly));

        // 2024-02-26 is a Monday, 2024-03-02 a Saturday
        let future = model.future_dates(7);
        let predicted = model.predict(&future);
        assert!(predicted[0] > predicted[5] + 4.0);
        assert!((predicted[0] - 10.0).abs() < 1.5);
        assert!((predicted[5] - 2.0).abs() < 1.5);
    }

    #[test]
    fn test_all_zero_series_fits_to_zero() {
        let series = DailySeries::from_counts("cobol", start(), &[0; 20]);
        let model = DecompositionModel::fit(&series, &ForecastConfig::default()).unwrap();
        assert_eq!(model.y_scale(), 1.0);
        let future = model.future_dates(5);
        for value in model.predict(&future) {
            assert!(value.abs() < 1e-6);
        }
    }

    #[test]
    fn test_flat_growth_ignores_slope() {
        let mut config = ForecastConfig::default();
        config.growth = forecast_api::Growth::Flat;
        config.daily = config.daily.disabled();
        let series = DailySeries::from_counts("go", start(), &[4, 6, 4, 6]);
        let model = DecompositionModel::fit(&series, &config).unwrap();
        assert!(model.deltas().is_empty());
        let future = model.predict(&model.future_dates(30));
        assert!((future[0] - future[29]).abs() < 1e-9);
        assert!((future[0] - 5.0).abs() < 0.5);
    }

    #[test]
    fn test_spent_deadline_aborts_fit() {
        let series = linear_series(30);
        let result = DecompositionModel::fit_within(
            &series,
            &ForecastConfig::default(),
            &Deadline::after_millis(0),
        );
        assert!(matches!(
            result,
            Err(ForecastError::Timeout { stage: "fit", .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ForecastConfig::default().with_interval_width(0.0);
        let result = DecompositionModel::fit(&linear_series(10), &config);
        assert!(matches!(
            result,
            Err(ForecastError::InvalidParameter { .. })
        ));
    }
}
