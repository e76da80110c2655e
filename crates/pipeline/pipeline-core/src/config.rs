//! Pipeline configuration

use std::path::{Path, PathBuf};

use extract_core::CorpusColumns;
use forecast_api::ForecastConfig;
use pipeline_spi::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Locations, corpus layout and model settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Category → terms JSON taxonomy
    pub vocabulary_path: PathBuf,
    /// Raw postings CSV
    pub corpus_path: PathBuf,
    /// Extracted `(posted_at, skills)` records
    pub records_path: PathBuf,
    /// Directory of `<skill>_timeseries.csv` artifacts
    pub series_dir: PathBuf,
    /// Directory of `<skill>_forecast.csv` artifacts
    pub forecast_dir: PathBuf,
    pub columns: CorpusColumns,
    /// Days forecast past the last observation
    pub horizon_days: usize,
    /// Forecast worker threads; `None` uses one per core
    pub workers: Option<usize>,
    pub forecast: ForecastConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: PathBuf::from("configs/skills.json"),
            corpus_path: PathBuf::from("data/raw/linkedin-jobs-usa.csv"),
            records_path: PathBuf::from("data/processed/jobs_with_skills.csv"),
            series_dir: PathBuf::from("data/processed/timeseries"),
            forecast_dir: PathBuf::from("results"),
            columns: CorpusColumns::default(),
            horizon_days: 30,
            workers: None,
            forecast: ForecastConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a TOML file; keys it omits keep their defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            PipelineError::Config(format!("read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&contents).map_err(|err| match err {
            PipelineError::Config(reason) => {
                PipelineError::Config(format!("{} in {}", reason, path.display()))
            }
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|err| PipelineError::Config(format!("parse: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(PipelineError::Config(
                "workers must be at least 1".to_string(),
            ));
        }
        self.forecast.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.horizon_days, 30);
        assert_eq!(config.workers, None);
        assert_eq!(config.columns.description, "description");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = PipelineConfig::from_toml_str(
            r#"
            corpus_path = "postings.csv"
            horizon_days = 90
            workers = 2

            [columns]
            date = "listed_at"

            [forecast]
            seed = 11
            uncertainty_samples = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.corpus_path, PathBuf::from("postings.csv"));
        assert_eq!(config.horizon_days, 90);
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.columns.date, "listed_at");
        assert_eq!(config.columns.title, "title");
        assert_eq!(config.forecast.seed, 11);
        assert_eq!(config.forecast.interval_width, 0.8);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = PipelineConfig::from_toml_str("workers = 0");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_invalid_forecast_section_rejected() {
        let result = PipelineConfig::from_toml_str("[forecast]\ninterval_width = 2.0");
        assert!(matches!(result, Err(PipelineError::Forecast(_))));
    }

    #[test]
    fn test_unparseable_toml_rejected() {
        let result = PipelineConfig::from_toml_str("horizon_days = \"soon\"");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = PipelineConfig::from_toml_file("/nonexistent/skillcast.toml");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
