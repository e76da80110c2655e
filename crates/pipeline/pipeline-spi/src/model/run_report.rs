//! Summary of a pipeline run

use serde::{Deserialize, Serialize};

use super::{SkillOutcome, SkillState};

/// Record-level bookkeeping from the extraction stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    /// Corpus rows read
    pub read: usize,
    /// Rows without description text
    pub dropped_missing: usize,
    /// Rows with an unreadable posting date
    pub dropped_bad_date: usize,
    /// Exact duplicate postings
    pub dropped_duplicate: usize,
    /// Postings that mention no vocabulary term
    pub dropped_no_skill: usize,
    /// Records handed to aggregation
    pub kept: usize,
}

/// Everything a run did, per record and per skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub records: RecordCounts,
    /// One outcome per aggregated skill, sorted by skill
    pub outcomes: Vec<SkillOutcome>,
}

impl RunReport {
    pub fn count(&self, state: SkillState) -> usize {
        self.outcomes.iter().filter(|o| o.state() == state).count()
    }

    pub fn forecasted(&self) -> usize {
        self.count(SkillState::Forecasted)
    }

    pub fn skipped(&self) -> usize {
        self.count(SkillState::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(SkillState::Failed)
    }

    pub fn outcome(&self, skill: &str) -> Option<&SkillOutcome> {
        self.outcomes.iter().find(|o| o.skill() == skill)
    }
}
