//! Skill Extraction Service Provider Interface
//!
//! Defines the vocabulary, posting and skill-set types shared by the
//! extraction stage, and the trait every skill matcher implements.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::SkillMatcher;
pub use error::{ExtractError, Result};
pub use model::{Posting, SkillSet, Vocabulary};
