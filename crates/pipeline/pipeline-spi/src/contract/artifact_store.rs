//! Trait for persisting per-skill artifacts

use std::path::PathBuf;

use forecast_spi::ForecastRow;
use series_spi::DailySeries;

use crate::error::Result;

/// Storage for per-skill series and forecast tables.
///
/// Implementations must write each skill to a distinct location so that
/// skills can be persisted concurrently.
pub trait ArtifactStore: Send + Sync {
    /// Persist a daily series, returning where it was written
    fn write_series(&self, series: &DailySeries) -> Result<PathBuf>;

    /// Load a skill's series, or `None` when it was never written
    fn read_series(&self, skill: &str) -> Result<Option<DailySeries>>;

    /// Skills with a stored series, sorted
    fn list_series(&self) -> Result<Vec<String>>;

    /// Delete a skill's series; `false` when there was none
    fn remove_series(&self, skill: &str) -> Result<bool>;

    /// Persist a forecast table, returning where it was written
    fn write_forecast(&self, skill: &str, rows: &[ForecastRow]) -> Result<PathBuf>;

    /// Load a skill's forecast, or `None` when it was never written
    fn read_forecast(&self, skill: &str) -> Result<Option<Vec<ForecastRow>>>;

    /// Skills with a stored forecast, sorted
    fn list_forecasts(&self) -> Result<Vec<String>>;

    /// Delete a skill's forecast; `false` when there was none
    fn remove_forecast(&self, skill: &str) -> Result<bool>;
}
