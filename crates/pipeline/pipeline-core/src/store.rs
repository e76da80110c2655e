//! CSV artifact store
//!
//! One `<stem>_timeseries.csv` and one `<stem>_forecast.csv` per skill,
//! where `<stem>` is the percent-encoded skill name.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use forecast_spi::ForecastRow;
use pipeline_spi::{ArtifactStore, PipelineError, Result};
use series_spi::DailySeries;
use tracing::debug;

use crate::config::PipelineConfig;

pub const SERIES_SUFFIX: &str = "_timeseries.csv";
pub const FORECAST_SUFFIX: &str = "_forecast.csv";

/// Filesystem-safe, reversible file stem for a skill
pub fn skill_stem(skill: &str) -> String {
    urlencoding::encode(skill).into_owned()
}

/// Skill name for a stem produced by [`skill_stem`]
pub fn skill_from_stem(stem: &str) -> Option<String> {
    urlencoding::decode(stem).ok().map(|s| s.into_owned())
}

/// Artifact store writing CSV files into two directories
#[derive(Debug, Clone)]
pub struct CsvArtifactStore {
    series_dir: PathBuf,
    forecast_dir: PathBuf,
}

impl CsvArtifactStore {
    pub fn new(series_dir: impl Into<PathBuf>, forecast_dir: impl Into<PathBuf>) -> Self {
        Self {
            series_dir: series_dir.into(),
            forecast_dir: forecast_dir.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.series_dir, &config.forecast_dir)
    }

    pub fn series_dir(&self) -> &Path {
        &self.series_dir
    }

    pub fn forecast_dir(&self) -> &Path {
        &self.forecast_dir
    }

    pub fn series_path(&self, skill: &str) -> PathBuf {
        self.series_dir
            .join(format!("{}{}", skill_stem(skill), SERIES_SUFFIX))
    }

    pub fn forecast_path(&self, skill: &str) -> PathBuf {
        self.forecast_dir
            .join(format!("{}{}", skill_stem(skill), FORECAST_SUFFIX))
    }
}

impl ArtifactStore for CsvArtifactStore {
    fn write_series(&self, series: &DailySeries) -> Result<PathBuf> {
        ensure_dir(&self.series_dir)?;
        let path = self.series_path(series.skill());
        series_core::write_series(&path, series)?;
        debug!(skill = %series.skill(), path = %path.display(), "series written");
        Ok(path)
    }

    fn read_series(&self, skill: &str) -> Result<Option<DailySeries>> {
        let path = self.series_path(skill);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(series_core::read_series(&path, skill)?))
    }

    fn list_series(&self) -> Result<Vec<String>> {
        list_skills(&self.series_dir, SERIES_SUFFIX)
    }

    fn remove_series(&self, skill: &str) -> Result<bool> {
        remove_file(&self.series_path(skill))
    }

    fn write_forecast(&self, skill: &str, rows: &[ForecastRow]) -> Result<PathBuf> {
        ensure_dir(&self.forecast_dir)?;
        let path = self.forecast_path(skill);
        write_forecast_file(&path, rows)?;
        Ok(path)
    }

    fn read_forecast(&self, skill: &str) -> Result<Option<Vec<ForecastRow>>> {
        let path = self.forecast_path(skill);
        if !path.is_file() {
            return Ok(None);
        }
        read_forecast_file(&path).map(Some)
    }

    fn list_forecasts(&self) -> Result<Vec<String>> {
        list_skills(&self.forecast_dir, FORECAST_SUFFIX)
    }

    fn remove_forecast(&self, skill: &str) -> Result<bool> {
        remove_file(&self.forecast_path(skill))
    }
}

/// Write `date,estimate,lower_bound,upper_bound` rows
pub fn write_forecast_file(path: &Path, rows: &[ForecastRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut csv = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        csv.serialize(row)
            .map_err(|e| PipelineError::artifact(path, e))?;
    }
    csv.flush().map_err(|e| PipelineError::io(path, e))
}

/// Read a forecast table written by [`write_forecast_file`]
pub fn read_forecast_file(path: &Path) -> Result<Vec<ForecastRow>> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut csv = csv::Reader::from_reader(BufReader::new(file));
    csv.deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| PipelineError::artifact(path, format!("line {}: {}", idx + 2, e)))
        })
        .collect()
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))
}

fn remove_file(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "artifact removed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

fn list_skills(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut skills = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io(dir, e))?;
        let name = entry.file_name();
        let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(suffix)) else {
            continue;
        };
        match skill_from_stem(stem) {
            Some(skill) if !skill.is_empty() => skills.push(skill),
            _ => debug!(file = %entry.path().display(), "ignoring artifact with undecodable name"),
        }
    }
    skills.sort();
    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_stems_are_reversible_and_safe() {
        for skill in ["python", "node.js", "c++", "ci/cd", "machine learning"] {
            let stem = skill_stem(skill);
            assert!(!stem.contains('/'));
            assert!(!stem.contains(' '));
            assert_eq!(skill_from_stem(&stem).as_deref(), Some(skill));
        }
        assert_eq!(skill_stem("node.js"), "node.js");
        assert_eq!(skill_stem("c++"), "c%2B%2B");
    }

    #[test]
    fn test_forecast_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::new(dir.path().join("ts"), dir.path().join("out"));
        let rows = vec![
            ForecastRow::new(day(1), 1.0, 0.5, 1.5),
            ForecastRow::new(day(2), -0.25, -1.0, 0.5),
        ];

        let path = store.write_forecast("ci/cd", &rows).unwrap();
        assert_eq!(path, dir.path().join("out").join("ci%2Fcd_forecast.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "date,estimate,lower_bound,upper_bound\n\
             2024-01-01,1.0,0.5,1.5\n\
             2024-01-02,-0.25,-1.0,0.5\n"
        );
        assert_eq!(store.read_forecast("ci/cd").unwrap(), Some(rows));
    }

    #[test]
    fn test_series_roundtrip_and_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::new(dir.path().join("ts"), dir.path().join("out"));

        store
            .write_series(&DailySeries::from_counts("sql", day(1), &[2, 0, 1]))
            .unwrap();
        store
            .write_series(&DailySeries::from_counts("c++", day(3), &[1]))
            .unwrap();
        std::fs::write(dir.path().join("ts").join("notes.txt"), "ignore me").unwrap();

        assert_eq!(
            store.list_series().unwrap(),
            vec!["c++".to_string(), "sql".to_string()]
        );
        let sql = store.read_series("sql").unwrap().unwrap();
        assert_eq!(sql.counts().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert!(store.list_forecasts().unwrap().is_empty());
    }

    #[test]
    fn test_missing_artifacts_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::new(dir.path().join("ts"), dir.path().join("out"));
        assert_eq!(store.read_series("rust").unwrap(), None);
        assert_eq!(store.read_forecast("rust").unwrap(), None);
        assert!(store.list_series().unwrap().is_empty());
    }

    #[test]
    fn test_remove_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvArtifactStore::new(dir.path().join("ts"), dir.path().join("out"));
        store
            .write_series(&DailySeries::from_counts("go", day(1), &[1, 2]))
            .unwrap();
        store
            .write_forecast("go", &[ForecastRow::point(day(1), 1.0)])
            .unwrap();

        assert!(store.remove_forecast("go").unwrap());
        assert!(!store.forecast_path("go").exists());
        assert!(store.series_path("go").exists());
        assert!(!store.remove_forecast("go").unwrap());

        assert!(store.remove_series("go").unwrap());
        assert!(store.list_series().unwrap().is_empty());
        assert!(!store.remove_series("never-written").unwrap());
    }

    #[test]
    fn test_corrupt_forecast_is_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_forecast.csv");
        std::fs::write(&path, "date,estimate,lower_bound,upper_bound\nyesterday,1,2,3\n").unwrap();
        assert!(matches!(
            read_forecast_file(&path),
            Err(PipelineError::Artifact { .. })
        ));
    }
}
