//! Model module containing data structures

mod run_report;
mod skill_outcome;
mod skill_state;

pub use run_report::{RecordCounts, RunReport};
pub use skill_outcome::{SkillOutcome, SkipReason};
pub use skill_state::SkillState;
