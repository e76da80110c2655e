//! Pipeline Service Provider Interface
//!
//! Defines the per-skill state machine, run outcomes, the artifact storage
//! contract and the pipeline error type.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ArtifactStore;
pub use error::{PipelineError, Result};
pub use model::{RecordCounts, RunReport, SkillOutcome, SkillState, SkipReason};
