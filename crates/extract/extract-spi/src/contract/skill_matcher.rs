//! Trait for matching skill terms in free text

use crate::model::SkillSet;

/// Finds vocabulary terms mentioned in a piece of text.
///
/// Implementations must be pure: the same text always yields the same set,
/// and every returned term belongs to the matcher's vocabulary.
pub trait SkillMatcher: Send + Sync {
    /// Return the set of skills mentioned in `text`
    fn extract(&self, text: &str) -> SkillSet;

    /// Extract from an optional field; a missing value behaves like empty text
    fn extract_field(&self, text: Option<&str>) -> SkillSet {
        self.extract(text.unwrap_or_default())
    }
}
