//! Vocabulary model

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Closed set of recognised skill terms.
///
/// Terms are stored trimmed and lowercase; empty terms are discarded and
/// duplicates collapse. Iteration is in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<String>", into = "BTreeSet<String>")]
pub struct Vocabulary {
    terms: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from any collection of terms
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Flatten a category taxonomy; category names are discarded
    pub fn from_categories(categories: &BTreeMap<String, Vec<String>>) -> Self {
        Self::from_terms(categories.values().flatten())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<BTreeSet<String>> for Vocabulary {
    fn from(terms: BTreeSet<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for BTreeSet<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_are_lowercased_and_deduplicated() {
        let vocab = Vocabulary::from_terms(["Python", "python", " SQL ", "AWS"]);
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("python"));
        assert!(vocab.contains("sql"));
        assert!(vocab.contains("aws"));
        assert!(!vocab.contains("Python"));
    }

    #[test]
    fn test_empty_terms_are_dropped() {
        let vocab = Vocabulary::from_terms(["", "   ", "rust"]);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_from_categories_flattens() {
        let mut categories = BTreeMap::new();
        categories.insert(
            "languages".to_string(),
            vec!["Python".to_string(), "Rust".to_string()],
        );
        categories.insert(
            "cloud".to_string(),
            vec!["AWS".to_string(), "python".to_string()],
        );

        let vocab = Vocabulary::from_categories(&categories);
        let terms: Vec<&String> = vocab.iter().collect();
        assert_eq!(terms, vec!["aws", "python", "rust"]);
    }

    #[test]
    fn test_serde_as_plain_list() {
        let vocab = Vocabulary::from_terms(["b", "a"]);
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["a","b"]"#);

        let back: Vocabulary = serde_json::from_str(r#"["Node.js","node.js"]"#).unwrap();
        assert_eq!(back.len(), 1);
        assert!(back.contains("node.js"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.iter().count(), 0);
    }
}
