//! Series error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building or reading a daily series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Dates are not strictly increasing
    #[error("Dates out of order: {next} does not follow {previous}")]
    Unordered { previous: NaiveDate, next: NaiveDate },

    /// A calendar day is missing between two entries
    #[error("Missing days between {previous} and {next}")]
    Gap { previous: NaiveDate, next: NaiveDate },

    /// A stored series row could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Series storage could not be read or written
    #[error("Series I/O error: {0}")]
    Io(String),
}
