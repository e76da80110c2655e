//! Raw postings corpus reader
//!
//! Reads a CSV export of job postings. Rows without a description or with
//! an unreadable posting date are dropped and counted; a missing file, a
//! missing required column or broken CSV framing is fatal. Fields that are
//! not valid UTF-8 are decoded lossily.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use extract_spi::{ExtractError, Posting, Result};

/// Column names used to read the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusColumns {
    pub title: String,
    pub company: String,
    pub description: String,
    pub date: String,
}

impl Default for CorpusColumns {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            company: "company".to_string(),
            description: "description".to_string(),
            date: "posted_date".to_string(),
        }
    }
}

/// Per-record bookkeeping for a corpus read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReport {
    /// Data rows seen
    pub rows: usize,
    /// Rows dropped for an empty description
    pub missing_description: usize,
    /// Rows dropped for an unparseable date
    pub bad_date: usize,
    /// Kept rows with invalid UTF-8 replaced by U+FFFD
    pub lossy_text: usize,
}

impl ReadReport {
    pub fn kept(&self) -> usize {
        self.rows - self.missing_description - self.bad_date
    }
}

/// Read postings from a CSV file
pub fn read_postings(
    path: impl AsRef<Path>,
    columns: &CorpusColumns,
) -> Result<(Vec<Posting>, ReadReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| ExtractError::Csv(e.to_string()))?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let description_idx = position(&columns.description)
        .ok_or_else(|| ExtractError::MissingColumn(columns.description.clone()))?;
    let date_idx =
        position(&columns.date).ok_or_else(|| ExtractError::MissingColumn(columns.date.clone()))?;
    let title_idx = position(&columns.title);
    let company_idx = position(&columns.company);

    let mut report = ReadReport::default();
    let mut postings = Vec::new();

    for result in reader.byte_records() {
        let record = result.map_err(|e| ExtractError::Csv(e.to_string()))?;
        report.rows += 1;

        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(String::from_utf8_lossy)
                .unwrap_or_default()
        };

        let description = field(Some(description_idx));
        if description.trim().is_empty() {
            report.missing_description += 1;
            continue;
        }

        let raw_date = field(Some(date_idx));
        let Some(posted_at) = parse_timestamp(&raw_date) else {
            debug!(row = report.rows, value = %raw_date, "dropping row with unparseable date");
            report.bad_date += 1;
            continue;
        };

        let title = field(title_idx);
        let company = field(company_idx);
        if [&title, &company, &description]
            .into_iter()
            .any(|text| matches!(text, Cow::Owned(_)))
        {
            debug!(row = report.rows, "replaced invalid UTF-8 in row");
            report.lossy_text += 1;
        }

        postings.push(Posting::new(title, company, description, posted_at));
    }

    info!(
        path = %path.display(),
        rows = report.rows,
        kept = postings.len(),
        missing_description = report.missing_description,
        bad_date = report.bad_date,
        lossy_text = report.lossy_text,
        "read corpus"
    );

    Ok((postings, report))
}

/// Drop exact duplicates on (title, company, description), keeping the
/// first occurrence. Returns the survivors and the number removed.
pub fn dedup_postings(postings: Vec<Posting>) -> (Vec<Posting>, usize) {
    let before = postings.len();
    let first_seen: Vec<bool> = {
        let mut seen = HashSet::with_capacity(before);
        postings.iter().map(|p| seen.insert(p.dedup_key())).collect()
    };
    let kept: Vec<Posting> = postings
        .into_iter()
        .zip(first_seen)
        .filter_map(|(posting, first)| first.then_some(posting))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Parse a posting timestamp into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// and bare `YYYY-MM-DD`; zone-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
