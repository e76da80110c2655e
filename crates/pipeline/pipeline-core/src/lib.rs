//! Pipeline Core
//!
//! Orchestrates skill extraction, daily aggregation and per-skill
//! forecasting, and persists the artifacts each stage produces.

pub mod config;
pub mod dashboard;
pub mod orchestrator;
pub mod records;
pub mod store;

// Re-export SPI types used across the API
pub use pipeline_spi::{
    ArtifactStore, PipelineError, RecordCounts, Result, RunReport, SkillOutcome, SkillState,
    SkipReason,
};

pub use config::PipelineConfig;
pub use dashboard::{join_history, ArtifactCache, Dashboard, DashboardRow};
pub use orchestrator::Orchestrator;
pub use records::{read_records, write_records, ExtractedRecord};
pub use store::{skill_from_stem, skill_stem, CsvArtifactStore, FORECAST_SUFFIX, SERIES_SUFFIX};
