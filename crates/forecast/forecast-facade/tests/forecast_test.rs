//! Unit tests for the forecast facade
//!
//! Exercise individual building blocks through the public re-exports.

use forecast_facade::confidence::{empirical_interval, quantile};
use forecast_facade::{
    ConfidenceIntervalComputer, ForecastConfig, ForecastRow, QuantileIntervalComputer, Trend,
};

// ============================================================================
// Confidence Interval Tests
// ============================================================================

#[test]
fn test_quantile_interval_brackets_draws() {
    let forecast = vec![10.0, 11.0, 12.0];
    let samples: Vec<Vec<f64>> = forecast
        .iter()
        .map(|&f| (0..101).map(|i| f - 5.0 + i as f64 * 0.1).collect())
        .collect();

    let result = QuantileIntervalComputer::new().compute(&forecast, &samples, 0.8);

    assert_eq!(result.forecast.len(), 3);
    for i in 0..3 {
        assert!((result.lower[i] - (forecast[i] - 4.0)).abs() < 1e-9);
        assert!((result.upper[i] - (forecast[i] + 4.0)).abs() < 1e-9);
    }
}

#[test]
fn test_quantile_median_of_even_count() {
    assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), 2.5);
}

#[test]
fn test_interval_keeps_level() {
    let result = empirical_interval(&[1.0], &[vec![0.0, 2.0]], 0.9);
    assert_eq!(result.confidence_level, 0.9);
}

// ============================================================================
// Trend Tests
// ============================================================================

#[test]
fn test_default_trend_changepoints() {
    let config = ForecastConfig::default();
    let trend = Trend::new(
        config.growth,
        100,
        config.n_changepoints,
        config.changepoint_range,
    );
    assert_eq!(trend.changepoints().len(), 25);
    assert_eq!(trend.n_params(), 27);
}

// ============================================================================
// Forecast Row Tests
// ============================================================================

#[test]
fn test_clipped_row_keeps_positive_values() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let row = ForecastRow::new(date, 2.0, 1.0, 3.0);
    assert_eq!(row.clipped(), row);
}
