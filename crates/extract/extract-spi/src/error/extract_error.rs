//! Extraction error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading extraction inputs.
///
/// Every variant is fatal to a pipeline run: a vocabulary or corpus that
/// cannot be read aborts before any per-skill work begins.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Taxonomy document is not a mapping of category to term list
    #[error("Invalid taxonomy in {path}: {reason}")]
    InvalidTaxonomy { path: PathBuf, reason: String },

    /// Corpus is missing a required column
    #[error("Corpus is missing required column '{0}'")]
    MissingColumn(String),

    /// Corpus could not be parsed as CSV
    #[error("Corpus parse error: {0}")]
    Csv(String),

    /// A vocabulary term could not be compiled into a matcher
    #[error("Invalid skill pattern '{term}': {reason}")]
    InvalidPattern { term: String, reason: String },
}

impl ExtractError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
