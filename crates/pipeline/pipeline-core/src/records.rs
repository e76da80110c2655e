//! Extracted `(posted_at, skills)` records and their CSV form

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use extract_core::parse_timestamp;
use extract_spi::SkillSet;
use pipeline_spi::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// One posting reduced to its date and the skills it mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub posted_at: DateTime<Utc>,
    pub skills: SkillSet,
}

impl ExtractedRecord {
    pub fn new(posted_at: DateTime<Utc>, skills: SkillSet) -> Self {
        Self { posted_at, skills }
    }
}

/// Write records as `posted_at,skills`, with skills as a JSON array
pub fn write_records(path: impl AsRef<Path>, records: &[ExtractedRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut csv = csv::Writer::from_writer(BufWriter::new(file));

    csv.write_record(["posted_at", "skills"])
        .map_err(|e| PipelineError::artifact(path, e))?;
    for record in records {
        let skills =
            serde_json::to_string(&record.skills).map_err(|e| PipelineError::artifact(path, e))?;
        csv.write_record([
            record.posted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            skills,
        ])
        .map_err(|e| PipelineError::artifact(path, e))?;
    }
    csv.flush().map_err(|e| PipelineError::io(path, e))
}

/// Read records written by [`write_records`]
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ExtractedRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut csv = csv::Reader::from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (idx, row) in csv.records().enumerate() {
        let line = idx + 2;
        let row = row.map_err(|e| PipelineError::artifact(path, e))?;
        let raw_date = row.get(0).unwrap_or_default();
        let posted_at = parse_timestamp(raw_date).ok_or_else(|| {
            PipelineError::artifact(path, format!("line {}: bad timestamp '{}'", line, raw_date))
        })?;
        let skills: SkillSet = serde_json::from_str(row.get(1).unwrap_or_default())
            .map_err(|e| PipelineError::artifact(path, format!("line {}: {}", line, e)))?;
        records.push(ExtractedRecord::new(posted_at, skills));
    }
    Ok(records)
}
