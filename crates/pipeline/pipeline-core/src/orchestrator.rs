//! Pipeline orchestrator
//!
//! Sequences extraction, aggregation and per-skill forecasting. Only an
//! unreadable vocabulary or corpus aborts a run; every per-skill problem
//! ends in a `SKIPPED` or `FAILED` outcome for that skill alone.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use extract_core::{dedup_postings, load_vocabulary, read_postings, SkillExtractor};
use extract_spi::SkillMatcher;
use forecast_core::forecast;
use pipeline_spi::{
    ArtifactStore, PipelineError, RecordCounts, Result, RunReport, SkillOutcome, SkillState,
    SkipReason,
};
use rayon::prelude::*;
use series_spi::DailySeries;
use tracing::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::records::{read_records, write_records, ExtractedRecord};
use crate::store::CsvArtifactStore;

/// Runs the pipeline stages against an artifact store
pub struct Orchestrator<S: ArtifactStore = CsvArtifactStore> {
    config: PipelineConfig,
    store: S,
}

impl Orchestrator<CsvArtifactStore> {
    /// Orchestrator writing CSV artifacts to the configured directories
    pub fn new(config: PipelineConfig) -> Self {
        let store = CsvArtifactStore::from_config(&config);
        Self { config, store }
    }
}

impl<S: ArtifactStore> Orchestrator<S> {
    pub fn with_store(config: PipelineConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the corpus and reduce each posting to its skill set.
    ///
    /// Fails only when the vocabulary or the corpus cannot be loaded.
    pub fn preprocess(&self) -> Result<(Vec<ExtractedRecord>, RecordCounts)> {
        let vocabulary = load_vocabulary(&self.config.vocabulary_path)?;
        let extractor = SkillExtractor::new(&vocabulary)?;
        info!(
            path = %self.config.vocabulary_path.display(),
            terms = vocabulary.len(),
            "vocabulary loaded"
        );

        let (postings, read) = read_postings(&self.config.corpus_path, &self.config.columns)?;
        let (postings, duplicates) = dedup_postings(postings);
        let unique = postings.len();

        let pool = self.pool()?;
        let records: Vec<ExtractedRecord> = pool.install(|| {
            postings
                .into_par_iter()
                .filter_map(|posting| {
                    let skills = extractor.extract(&posting.description);
                    (!skills.is_empty()).then(|| ExtractedRecord::new(posting.posted_at, skills))
                })
                .collect()
        });

        let counts = RecordCounts {
            read: read.rows,
            dropped_missing: read.missing_description,
            dropped_bad_date: read.bad_date,
            dropped_duplicate: duplicates,
            dropped_no_skill: unique - records.len(),
            kept: records.len(),
        };
        info!(
            read = counts.read,
            kept = counts.kept,
            duplicates = counts.dropped_duplicate,
            no_skill = counts.dropped_no_skill,
            state = %SkillState::Extracted,
            "extraction complete"
        );
        Ok((records, counts))
    }

    /// Persist extracted records to the configured records path
    pub fn write_records(&self, records: &[ExtractedRecord]) -> Result<PathBuf> {
        write_records(&self.config.records_path, records)?;
        info!(
            path = %self.config.records_path.display(),
            records = records.len(),
            "records written"
        );
        Ok(self.config.records_path.clone())
    }

    /// Load records written by an earlier `preprocess` stage
    pub fn read_records(&self) -> Result<Vec<ExtractedRecord>> {
        read_records(&self.config.records_path)
    }

    /// Aggregate records into per-skill daily series and persist each one.
    ///
    /// A series that cannot be persisted is left out of the returned map
    /// and reported as a `FAILED` outcome; the other skills carry on.
    pub fn build_series(
        &self,
        records: &[ExtractedRecord],
    ) -> (BTreeMap<String, DailySeries>, Vec<SkillOutcome>) {
        let mut series = series_core::build_series(
            records
                .iter()
                .map(|record| (record.posted_at, record.skills.iter())),
        );

        let mut failed = Vec::new();
        series.retain(|skill, daily| match self.store.write_series(daily) {
            Ok(_) => {
                debug!(
                    skill = %skill,
                    points = daily.len(),
                    mentions = daily.total(),
                    state = %SkillState::Aggregated,
                    "series built"
                );
                true
            }
            Err(e) => {
                error!(skill = %skill, error = %e, state = %SkillState::Failed, "series not persisted");
                failed.push(SkillOutcome::Failed {
                    skill: skill.clone(),
                    error: e.to_string(),
                });
                false
            }
        });

        info!(skills = series.len(), failed = failed.len(), "aggregation complete");
        (series, failed)
    }

    /// Forecast every series in parallel, one outcome per skill in order
    pub fn forecast_all(&self, series: &BTreeMap<String, DailySeries>) -> Result<Vec<SkillOutcome>> {
        let work: Vec<&DailySeries> = series.values().collect();
        let pool = self.pool()?;
        let outcomes: Vec<SkillOutcome> =
            pool.install(|| work.par_iter().map(|s| self.forecast_skill(s)).collect());

        info!(
            forecasted = count(&outcomes, SkillState::Forecasted),
            skipped = count(&outcomes, SkillState::Skipped),
            failed = count(&outcomes, SkillState::Failed),
            "forecasting complete"
        );
        Ok(outcomes)
    }

    /// Forecast one skill and persist the result
    pub fn forecast_skill(&self, series: &DailySeries) -> SkillOutcome {
        let skill = series.skill().to_string();
        match forecast(series, self.config.horizon_days, &self.config.forecast) {
            Ok(Some(rows)) => match self.store.write_forecast(&skill, &rows) {
                Ok(path) => {
                    info!(
                        skill = %skill,
                        rows = rows.len(),
                        state = %SkillState::Forecasted,
                        "forecast written"
                    );
                    SkillOutcome::Forecasted {
                        skill,
                        rows: rows.len(),
                        path,
                    }
                }
                Err(e) => {
                    error!(skill = %skill, error = %e, state = %SkillState::Failed, "forecast not persisted");
                    self.discard_forecast(&skill);
                    SkillOutcome::Failed {
                        skill,
                        error: e.to_string(),
                    }
                }
            },
            Ok(None) => {
                warn!(
                    skill = %skill,
                    points = series.len(),
                    reason = "insufficient_data",
                    state = %SkillState::Skipped,
                    "skill skipped"
                );
                self.discard_forecast(&skill);
                SkillOutcome::Skipped {
                    skill,
                    reason: SkipReason::InsufficientData {
                        points: series.len(),
                    },
                }
            }
            Err(e) => {
                error!(skill = %skill, error = %e, state = %SkillState::Failed, "forecast failed");
                self.discard_forecast(&skill);
                SkillOutcome::Failed {
                    skill,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Forecast every series artifact found in the store
    pub fn forecast_directory(&self) -> Result<Vec<SkillOutcome>> {
        let mut series = BTreeMap::new();
        let mut unreadable = Vec::new();

        for skill in self.store.list_series()? {
            match self.store.read_series(&skill) {
                Ok(Some(daily)) => {
                    series.insert(skill, daily);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(skill = %skill, error = %e, state = %SkillState::Failed, "series unreadable");
                    self.discard_forecast(&skill);
                    unreadable.push(SkillOutcome::Failed {
                        skill,
                        error: e.to_string(),
                    });
                }
            }
        }
        info!(skills = series.len(), "series loaded");

        self.prune_forecasts(&series.keys().cloned().collect());

        let mut outcomes = self.forecast_all(&series)?;
        outcomes.extend(unreadable);
        outcomes.sort_by(|a, b| a.skill().cmp(b.skill()));
        Ok(outcomes)
    }

    /// All stages end to end
    pub fn run(&self) -> Result<RunReport> {
        info!(
            corpus = %self.config.corpus_path.display(),
            horizon_days = self.config.horizon_days,
            "pipeline run started"
        );
        let (records, counts) = self.preprocess()?;
        self.write_records(&records)?;
        let (series, mut outcomes) = self.build_series(&records);

        let current: BTreeSet<String> = series.keys().cloned().collect();
        self.prune_series(&current);
        self.prune_forecasts(&current);

        outcomes.extend(self.forecast_all(&series)?);
        outcomes.sort_by(|a, b| a.skill().cmp(b.skill()));

        let report = RunReport {
            records: counts,
            outcomes,
        };
        info!(
            forecasted = report.forecasted(),
            skipped = report.skipped(),
            failed = report.failed(),
            "pipeline run complete"
        );
        Ok(report)
    }

    /// Remove series artifacts for skills absent from `keep`
    fn prune_series(&self, keep: &BTreeSet<String>) {
        let stored = match self.store.list_series() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "stored series not listed");
                return;
            }
        };
        for skill in stored.iter().filter(|s| !keep.contains(*s)) {
            match self.store.remove_series(skill) {
                Ok(true) => info!(skill = %skill, "stale series removed"),
                Ok(false) => {}
                Err(e) => warn!(skill = %skill, error = %e, "stale series not removed"),
            }
        }
    }

    /// Remove forecast artifacts for skills absent from `keep`
    fn prune_forecasts(&self, keep: &BTreeSet<String>) {
        let stored = match self.store.list_forecasts() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "stored forecasts not listed");
                return;
            }
        };
        for skill in stored.iter().filter(|s| !keep.contains(*s)) {
            self.discard_forecast(skill);
        }
    }

    /// Drop an earlier forecast for a skill that produced none this time
    fn discard_forecast(&self, skill: &str) {
        match self.store.remove_forecast(skill) {
            Ok(true) => info!(skill = %skill, "previous forecast removed"),
            Ok(false) => {}
            Err(e) => warn!(skill = %skill, error = %e, "previous forecast not removed"),
        }
    }

    fn pool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(workers) = self.config.workers {
            builder = builder.num_threads(workers);
        }
        builder
            .build()
            .map_err(|e| PipelineError::WorkerPool(e.to_string()))
    }
}

fn count(outcomes: &[SkillOutcome], state: SkillState) -> usize {
    outcomes.iter().filter(|o| o.state() == state).count()
}
