//! Vocabulary-based skill extractor
//!
//! Two complementary passes are unioned:
//!
//! 1. token pass: the lowercase text is tokenized and each token is looked
//!    up in the vocabulary, catching single-word skills exactly;
//! 2. pattern pass: every term is searched as a `\b`-anchored literal over
//!    the whole lowercase text, catching multi-word and punctuated terms
//!    such as `machine learning` or `node.js`.

use regex::{Regex, RegexSet};

use crate::tokenizer::tokenize;
use extract_spi::{ExtractError, Result, SkillMatcher, SkillSet, Vocabulary};

/// Compiled matcher over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Vocabulary,
    /// Terms in the same order as the patterns in `patterns`
    terms: Vec<String>,
    patterns: RegexSet,
}

impl SkillExtractor {
    /// Compile one word-boundary pattern per vocabulary term
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let terms: Vec<String> = vocabulary.iter().cloned().collect();
        let patterns = RegexSet::new(terms.iter().map(|t| word_pattern(t))).map_err(|e| {
            let term = terms
                .iter()
                .find(|t| Regex::new(&word_pattern(t)).is_err())
                .cloned()
                .unwrap_or_else(|| format!("<{} terms>", terms.len()));
            ExtractError::InvalidPattern {
                term,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            vocabulary: vocabulary.clone(),
            terms,
            patterns,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl SkillMatcher for SkillExtractor {
    fn extract(&self, text: &str) -> SkillSet {
        let text = text.to_lowercase();

        let mut found: SkillSet = tokenize(&text)
            .filter(|token| self.vocabulary.contains(token))
            .map(str::to_string)
            .collect();

        found.extend(
            self.patterns
                .matches(&text)
                .into_iter()
                .map(|idx| self.terms[idx].clone()),
        );

        found
    }
}

/// Extract skills from `text` against `vocabulary` in one call.
///
/// Compiles the vocabulary on every call; use [`SkillExtractor`] directly
/// when scanning many postings.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> Result<SkillSet> {
    Ok(SkillExtractor::new(vocabulary)?.extract(text))
}

fn word_pattern(term: &str) -> String {
    format!(r"\b{}\b", regex::escape(term))
}
