//! Trait for per-skill demand forecasters

use series_spi::DailySeries;

use crate::error::Result;
use crate::model::ForecastRow;

/// Produces a forecast table for one daily series.
pub trait Forecaster: Send + Sync {
    /// Forecast every historical date plus `horizon_days` future days.
    ///
    /// Returns `Ok(None)` when the series is too short to estimate a trend;
    /// callers skip the skill rather than treating it as a failure.
    fn forecast(
        &self,
        series: &DailySeries,
        horizon_days: usize,
    ) -> Result<Option<Vec<ForecastRow>>>;

    /// Name of this forecaster
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MIN_POINTS;
    use chrono::Days;

    /// Mock implementation: repeats the last observed count
    struct NaiveForecaster;

    impl Forecaster for NaiveForecaster {
        fn forecast(
            &self,
            series: &DailySeries,
            horizon_days: usize,
        ) -> Result<Option<Vec<ForecastRow>>> {
            if series.len() < MIN_POINTS {
                return Ok(None);
            }
            let mut rows: Vec<ForecastRow> = series
                .points()
                .iter()
                .map(|p| ForecastRow::point(p.date, f64::from(p.count)))
                .collect();
            let last = series.points()[series.len() - 1];
            for h in 1..=horizon_days {
                rows.push(ForecastRow::point(
                    last.date + Days::new(h as u64),
                    f64::from(last.count),
                ));
            }
            Ok(Some(rows))
        }

        fn name(&self) -> &str {
            "naive"
        }
    }

    fn series(counts: &[u32]) -> DailySeries {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DailySeries::from_counts("python", start, counts)
    }

    #[test]
    fn test_short_series_is_skipped() {
        let result = NaiveForecaster.forecast(&series(&[3]), 5).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_rows_cover_history_and_horizon() {
        let rows = NaiveForecaster
            .forecast(&series(&[1, 2, 3]), 4)
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[6].estimate, 3.0);
    }

    #[test]
    fn test_forecaster_is_object_safe() {
        let forecaster: Box<dyn Forecaster> = Box::new(NaiveForecaster);
        assert_eq!(forecaster.name(), "naive");
    }
}
