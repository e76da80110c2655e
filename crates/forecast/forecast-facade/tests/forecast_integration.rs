//! Integration tests for the forecast stack

use chrono::NaiveDate;
use forecast_facade::{
    forecast, DecompositionModel, ForecastConfig, ForecastError, Growth, SeasonalityMode,
};
use series_spi::DailySeries;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

fn trending_weekly(days: u32) -> DailySeries {
    let counts: Vec<u32> = (0..days)
        .map(|i| 20 + i / 4 + if i % 7 == 5 || i % 7 == 6 { 0 } else { 6 })
        .collect();
    DailySeries::from_counts("kubernetes", start(), &counts)
}

#[test]
fn test_model_and_forecast_agree_on_estimates() {
    let series = trending_weekly(90);
    let config = ForecastConfig::default().with_uncertainty_samples(100);

    let model = DecompositionModel::fit(&series, &config).unwrap();
    let dates: Vec<NaiveDate> = model.history_dates().chain(model.future_dates(14)).collect();
    let predicted = model.predict(&dates);

    let rows = forecast(&series, 14, &config).unwrap().unwrap();
    assert_eq!(rows.len(), predicted.len());
    for (row, value) in rows.iter().zip(&predicted) {
        assert!((row.estimate - value).abs() < 1e-9);
    }
}

#[test]
fn test_history_fit_tracks_observations() {
    let series = trending_weekly(90);
    let rows = forecast(&series, 0, &ForecastConfig::default().with_uncertainty_samples(0))
        .unwrap()
        .unwrap();

    let actual = series.values();
    let mae = rows
        .iter()
        .zip(&actual)
        .map(|(r, a)| (r.estimate - a).abs())
        .sum::<f64>()
        / actual.len() as f64;
    assert!(mae < 1.5, "mean absolute error {}", mae);
}

#[test]
fn test_trend_continues_upward() {
    let series = trending_weekly(120);
    let rows = forecast(&series, 28, &ForecastConfig::default().with_uncertainty_samples(0))
        .unwrap()
        .unwrap();
    let n = rows.len();
    // Same weekday, four weeks apart
    assert!(rows[n - 1].estimate > rows[n - 29].estimate);
}

#[test]
fn test_intervals_cover_most_history() {
    let series = trending_weekly(90);
    let config = ForecastConfig::default().with_uncertainty_samples(500);
    let rows = forecast(&series, 0, &config).unwrap().unwrap();

    let covered = rows
        .iter()
        .zip(series.values())
        .filter(|(r, a)| r.lower_bound <= *a && *a <= r.upper_bound)
        .count();
    assert!(covered as f64 / rows.len() as f64 > 0.6);
}

#[test]
fn test_intervals_widen_into_the_future() {
    // Flat, then climbing: the fitted changepoints carry real rate changes
    let counts: Vec<u32> = (0..90u32)
        .map(|i| if i < 45 { 20 } else { 20 + (i - 45) })
        .collect();
    let series = DailySeries::from_counts("terraform", start(), &counts);
    let rows = forecast(&series, 60, &ForecastConfig::default())
        .unwrap()
        .unwrap();

    let first = &rows[90];
    let last = rows.last().unwrap();
    let first_width = first.upper_bound - first.lower_bound;
    let last_width = last.upper_bound - last.lower_bound;
    assert!(last_width > 1.5 * first_width, "{} vs {}", last_width, first_width);
}

#[test]
fn test_disabled_weekly_flattens_weekdays() {
    let series = trending_weekly(60);
    let mut config = ForecastConfig::default().with_uncertainty_samples(0);
    config.weekly.mode = SeasonalityMode::Disabled;

    let model = DecompositionModel::fit(&series, &config).unwrap();
    let components = model.components(&model.future_dates(7));
    assert!(components.weekly.iter().all(|&v| v == 0.0));
}

#[test]
fn test_flat_growth_forecast_is_level() {
    let series = trending_weekly(60);
    let mut config = ForecastConfig::default().with_uncertainty_samples(0);
    config.growth = Growth::Flat;
    config.weekly.mode = SeasonalityMode::Disabled;

    let rows = forecast(&series, 10, &config).unwrap().unwrap();
    let n = rows.len();
    assert!((rows[n - 1].estimate - rows[n - 10].estimate).abs() < 1e-9);
}

#[test]
fn test_invalid_config_surfaces_as_error() {
    let series = trending_weekly(20);
    let mut config = ForecastConfig::default();
    config.changepoint_range = 0.0;
    assert!(matches!(
        forecast(&series, 5, &config),
        Err(ForecastError::InvalidParameter { .. })
    ));
}
