//! Pipeline Facade
//!
//! High-level API for the skill demand pipeline. Re-exports the pipeline
//! together with the extraction, series and forecast stacks it drives.

// Re-export everything from core (which includes SPI)
pub use pipeline_core::*;

// Re-export the lower stacks as namespaces
pub use extract_core as extract;
pub use forecast_facade as forecast;
pub use series_core as series;

// Re-export the types callers touch most at root
pub use extract_core::{extract_skills, load_vocabulary, CorpusColumns, SkillExtractor};
pub use extract_spi::{Posting, SkillSet, Vocabulary};
pub use forecast_facade::{ForecastConfig, ForecastRow, Growth, SeasonalityConfig, SeasonalityMode};
pub use series_core::build_series;
pub use series_spi::{DailyCount, DailySeries};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArtifactStore, CsvArtifactStore, DailySeries, ForecastConfig, ForecastRow, Orchestrator,
        PipelineConfig, PipelineError, RunReport, SkillOutcome, SkillState,
    };
}
