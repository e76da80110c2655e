//! Contract module containing trait definitions for skill extraction

mod skill_matcher;

pub use skill_matcher::SkillMatcher;
