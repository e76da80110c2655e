//! Posting model

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Set of vocabulary terms found in one posting
pub type SkillSet = BTreeSet<String>;

/// One raw job posting.
///
/// `title` and `company` only take part in deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub posted_at: DateTime<Utc>,
}

impl Posting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            description: description.into(),
            posted_at,
        }
    }

    /// Exact-match identity used to drop duplicate postings
    pub fn dedup_key(&self) -> (&str, &str, &str) {
        (&self.title, &self.company, &self.description)
    }

    /// Calendar day of the posting in UTC
    pub fn posted_on(&self) -> NaiveDate {
        self.posted_at.date_naive()
    }
}
