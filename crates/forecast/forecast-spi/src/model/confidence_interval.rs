//! Confidence interval model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ForecastRow;

/// Confidence interval result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
    /// Confidence level (e.g., 0.8 for 80%)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Degenerate interval where both bounds equal the forecast
    pub fn collapsed(forecast: &[f64], confidence_level: f64) -> Self {
        Self {
            forecast: forecast.to_vec(),
            lower: forecast.to_vec(),
            upper: forecast.to_vec(),
            confidence_level,
        }
    }

    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Pair each position with its date; extra entries on either side are dropped
    pub fn rows(&self, dates: &[NaiveDate]) -> Vec<ForecastRow> {
        dates
            .iter()
            .zip(&self.forecast)
            .zip(self.lower.iter().zip(&self.upper))
            .map(|((&date, &estimate), (&lower, &upper))| {
                ForecastRow::new(date, estimate, lower, upper)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval_creation() {
        let ci = ConfidenceInterval {
            forecast: vec![100.0, 110.0, 120.0],
            lower: vec![90.0, 100.0, 110.0],
            upper: vec![110.0, 120.0, 130.0],
            confidence_level: 0.95,
        };

        assert_eq!(ci.len(), 3);
        for i in 0..ci.len() {
            assert!(ci.lower[i] <= ci.forecast[i]);
            assert!(ci.forecast[i] <= ci.upper[i]);
        }
    }

    #[test]
    fn test_confidence_interval_collapsed() {
        let ci = ConfidenceInterval::collapsed(&[1.0, 2.0], 0.8);
        assert_eq!(ci.lower, ci.forecast);
        assert_eq!(ci.upper, ci.forecast);
        assert_eq!(ci.confidence_level, 0.8);
    }

    #[test]
    fn test_confidence_interval_empty_vectors() {
        let ci = ConfidenceInterval::collapsed(&[], 0.9);
        assert!(ci.is_empty());
    }

    #[test]
    fn test_confidence_interval_asymmetric_bounds() {
        let ci = ConfidenceInterval {
            forecast: vec![100.0],
            lower: vec![80.0],
            upper: vec![150.0],
            confidence_level: 0.95,
        };

        assert_eq!(ci.forecast[0] - ci.lower[0], 20.0);
        assert_eq!(ci.upper[0] - ci.forecast[0], 50.0);
    }

    #[test]
    fn test_rows_pair_dates_with_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = start.iter_days().take(3).collect();
        let ci = ConfidenceInterval {
            forecast: vec![1.0, 2.0],
            lower: vec![0.5, 1.5],
            upper: vec![1.5, 2.5],
            confidence_level: 0.8,
        };

        let rows = ci.rows(&dates);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ForecastRow::new(dates[1], 2.0, 1.5, 2.5));
    }
}
