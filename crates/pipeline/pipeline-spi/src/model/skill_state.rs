//! Per-skill processing state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a skill is in the pipeline.
///
/// `PENDING → EXTRACTED → AGGREGATED → FORECASTED | SKIPPED | FAILED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillState {
    Pending,
    Extracted,
    Aggregated,
    Forecasted,
    Skipped,
    Failed,
}

impl SkillState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Forecasted | Self::Skipped | Self::Failed)
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_advance_to(self, next: SkillState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Extracted)
                | (Self::Extracted, Self::Aggregated)
                | (Self::Aggregated, Self::Forecasted)
                | (Self::Aggregated, Self::Skipped)
                | (Self::Aggregated, Self::Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Extracted => "EXTRACTED",
            Self::Aggregated => "AGGREGATED",
            Self::Forecasted => "FORECASTED",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for SkillState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
