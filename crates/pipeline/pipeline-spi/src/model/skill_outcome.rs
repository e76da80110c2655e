//! Terminal result for one skill

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::SkillState;

/// Why a skill produced no forecast without failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Too few observed days to estimate a trend
    InsufficientData { points: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { points } => write!(f, "insufficient_data ({} points)", points),
        }
    }
}

/// Final state of one skill after a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillOutcome {
    Forecasted {
        skill: String,
        rows: usize,
        path: PathBuf,
    },
    Skipped {
        skill: String,
        reason: SkipReason,
    },
    Failed {
        skill: String,
        error: String,
    },
}

impl SkillOutcome {
    pub fn skill(&self) -> &str {
        match self {
            Self::Forecasted { skill, .. }
            | Self::Skipped { skill, .. }
            | Self::Failed { skill, .. } => skill,
        }
    }

    pub fn state(&self) -> SkillState {
        match self {
            Self::Forecasted { .. } => SkillState::Forecasted,
            Self::Skipped { .. } => SkillState::Skipped,
            Self::Failed { .. } => SkillState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_state_and_skill() {
        let outcome = SkillOutcome::Skipped {
            skill: "aws".into(),
            reason: SkipReason::InsufficientData { points: 1 },
        };
        assert_eq!(outcome.skill(), "aws");
        assert_eq!(outcome.state(), SkillState::Skipped);
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let outcome = SkillOutcome::Failed {
            skill: "rust".into(),
            error: "Timed out".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["state"], "FAILED");
        assert_eq!(json["skill"], "rust");
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::InsufficientData { points: 1 };
        assert_eq!(reason.to_string(), "insufficient_data (1 points)");
    }
}
