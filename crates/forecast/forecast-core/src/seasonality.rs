//! Fourier seasonal terms

use chrono::{Datelike, NaiveDate};
use forecast_api::{ForecastConfig, SeasonalityConfig};

/// Days from 0001-01-01 to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Which seasonal component a Fourier block models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Yearly,
    Weekly,
    Daily,
}

/// One active Fourier seasonal block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourierSeasonality {
    pub component: Component,
    pub period: f64,
    pub order: usize,
}

impl FourierSeasonality {
    /// Two columns (sin, cos) per harmonic
    pub fn n_params(&self) -> usize {
        2 * self.order
    }

    /// Append sin/cos features for `day` (days since 1970-01-01)
    pub fn write_features(&self, day: f64, out: &mut Vec<f64>) {
        let phase = (day / self.period).rem_euclid(1.0);
        for harmonic in 1..=self.order {
            let angle = 2.0 * std::f64::consts::PI * harmonic as f64 * phase;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }
}

/// Days since 1970-01-01
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// Seasonal blocks that apply to a history spanning `span_days`
pub fn active_seasonalities(config: &ForecastConfig, span_days: f64) -> Vec<FourierSeasonality> {
    let candidates: [(Component, &SeasonalityConfig); 3] = [
        (Component::Yearly, &config.yearly),
        (Component::Weekly, &config.weekly),
        (Component::Daily, &config.daily),
    ];
    candidates
        .into_iter()
        .filter(|(_, seasonality)| seasonality.is_active(span_days))
        .map(|(component, seasonality)| FourierSeasonality {
            component,
            period: seasonality.period,
            order: seasonality.fourier_order,
        })
        .collect()
}
