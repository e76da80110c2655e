//! Series-to-forecast entry points

use chrono::NaiveDate;
use forecast_api::ForecastConfig;
use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, ForecastRow, Forecaster, Result, MIN_POINTS,
};
use series_spi::DailySeries;
use tracing::debug;

use crate::confidence::QuantileIntervalComputer;
use crate::deadline::Deadline;
use crate::model::DecompositionModel;
use crate::sampling::sample_predictive;

/// Forecast every historical day plus `horizon_days` future days.
///
/// Returns `Ok(None)` when the series is too short to estimate a trend.
pub fn forecast(
    series: &DailySeries,
    horizon_days: usize,
    config: &ForecastConfig,
) -> Result<Option<Vec<ForecastRow>>> {
    if series.len() < MIN_POINTS {
        debug!(skill = %series.skill(), points = series.len(), "too few points to forecast");
        return Ok(None);
    }

    let deadline = Deadline::after_millis(config.fit_timeout_ms);
    let model = DecompositionModel::fit_within(series, config, &deadline)?;

    let dates: Vec<NaiveDate> = model
        .history_dates()
        .chain(model.future_dates(horizon_days))
        .collect();
    let estimate = model.predict(&dates);

    let interval = if config.uncertainty_samples == 0 {
        ConfidenceInterval::collapsed(&estimate, config.interval_width)
    } else {
        let draws = sample_predictive(
            &model,
            &dates,
            config.uncertainty_samples,
            config.seed,
            &deadline,
        )?;
        QuantileIntervalComputer::new().compute(&estimate, &draws, config.interval_width)
    };

    let mut rows = interval.rows(&dates);
    if config.clip_negative {
        rows.iter_mut().for_each(|row| *row = row.clipped());
    }

    debug!(
        skill = %series.skill(),
        horizon = horizon_days,
        elapsed_ms = deadline.elapsed().as_millis() as u64,
        "forecast complete"
    );
    Ok(Some(rows))
}

/// `Forecaster` backed by the additive decomposition model
#[derive(Debug, Clone, Default)]
pub struct DecompositionForecaster {
    config: ForecastConfig,
}

impl DecompositionForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

impl Forecaster for DecompositionForecaster {
    fn forecast(
        &self,
        series: &DailySeries,
        horizon_days: usize,
    ) -> Result<Option<Vec<ForecastRow>>> {
        forecast(series, horizon_days, &self.config)
    }

    fn name(&self) -> &str {
        "decomposition"
    }
}
