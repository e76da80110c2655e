//! Pipeline error types

use std::path::PathBuf;

use extract_spi::ExtractError;
use forecast_spi::ForecastError;
use series_spi::SeriesError;
use thiserror::Error;

/// Errors that can occur during pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Vocabulary or corpus could not be loaded
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Series artifact could not be built or parsed
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Model fitting failed
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Artifact file could not be read or written
    #[error("Artifact I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact content is malformed
    #[error("Malformed artifact {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    /// Configuration file is unreadable or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl PipelineError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn artifact(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Artifact {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
