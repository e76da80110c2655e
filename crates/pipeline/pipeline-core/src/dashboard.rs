//! Dashboard data access
//!
//! Loads forecast tables and their matching history through an explicit
//! memo keyed by path and modification time, and joins them on date.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::NaiveDate;
use forecast_spi::ForecastRow;
use pipeline_spi::{ArtifactStore, PipelineError, Result};
use serde::Serialize;
use series_spi::DailySeries;
use tracing::debug;

use crate::store::{read_forecast_file, CsvArtifactStore, FORECAST_SUFFIX};

struct Cached<T> {
    modified: SystemTime,
    value: Arc<T>,
}

/// Memoized artifact loader.
///
/// An entry is reused while the file's modification time is unchanged.
#[derive(Default)]
pub struct ArtifactCache {
    forecasts: HashMap<PathBuf, Cached<Vec<ForecastRow>>>,
    series: HashMap<PathBuf, Cached<DailySeries>>,
    hits: usize,
    misses: usize,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_forecast(&mut self, path: &Path) -> Result<Arc<Vec<ForecastRow>>> {
        let modified = modified_at(path)?;
        if let Some(entry) = self.forecasts.get(path) {
            if entry.modified == modified {
                self.hits += 1;
                return Ok(Arc::clone(&entry.value));
            }
        }
        self.misses += 1;
        let value = Arc::new(read_forecast_file(path)?);
        self.forecasts.insert(
            path.to_path_buf(),
            Cached {
                modified,
                value: Arc::clone(&value),
            },
        );
        Ok(value)
    }

    pub fn load_series(&mut self, path: &Path, skill: &str) -> Result<Arc<DailySeries>> {
        let modified = modified_at(path)?;
        if let Some(entry) = self.series.get(path) {
            if entry.modified == modified {
                self.hits += 1;
                return Ok(Arc::clone(&entry.value));
            }
        }
        self.misses += 1;
        let value = Arc::new(series_core::read_series(path, skill)?);
        self.series.insert(
            path.to_path_buf(),
            Cached {
                modified,
                value: Arc::clone(&value),
            },
        );
        Ok(value)
    }

    /// Drop any entry for `path`; returns whether one existed
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let forecast = self.forecasts.remove(path).is_some();
        let series = self.series.remove(path).is_some();
        forecast || series
    }

    pub fn clear(&mut self) {
        self.forecasts.clear();
        self.series.clear();
    }

    pub fn len(&self) -> usize {
        self.forecasts.len() + self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

fn modified_at(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| PipelineError::io(path, e))
}

/// One forecast row with the observed count for its date, if any
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardRow {
    pub date: NaiveDate,
    pub actual: Option<u32>,
    pub estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Left-join forecast rows with observed counts on date
pub fn join_history(forecast: &[ForecastRow], history: &DailySeries) -> Vec<DashboardRow> {
    forecast
        .iter()
        .map(|row| DashboardRow {
            date: row.date,
            actual: history.count_on(row.date),
            estimate: row.estimate,
            lower_bound: row.lower_bound,
            upper_bound: row.upper_bound,
        })
        .collect()
}

/// Read-side view over the artifact directories
pub struct Dashboard {
    store: CsvArtifactStore,
    cache: ArtifactCache,
}

impl Dashboard {
    pub fn new(store: CsvArtifactStore) -> Self {
        Self {
            store,
            cache: ArtifactCache::new(),
        }
    }

    /// Skills with a forecast artifact, sorted
    pub fn skills(&self) -> Result<Vec<String>> {
        self.store.list_forecasts()
    }

    /// Joined rows for `skill`, or `None` when it has no forecast.
    ///
    /// Missing history joins as an empty series.
    pub fn view(&mut self, skill: &str) -> Result<Option<Vec<DashboardRow>>> {
        let forecast_path = self.store.forecast_path(skill);
        if !forecast_path.is_file() {
            debug!(skill, suffix = FORECAST_SUFFIX, "no forecast artifact");
            return Ok(None);
        }
        let forecast = self.cache.load_forecast(&forecast_path)?;

        let history_path = self.store.series_path(skill);
        let history = if history_path.is_file() {
            self.cache.load_series(&history_path, skill)?
        } else {
            debug!(skill, "no history artifact, joining empty series");
            Arc::new(DailySeries::from_counts(skill, NaiveDate::MIN, &[]))
        };

        Ok(Some(join_history(&forecast, &history)))
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ArtifactCache {
        &mut self.cache
    }
}
