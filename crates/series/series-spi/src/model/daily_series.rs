//! Daily series model

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};

/// Mention count for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// Gap-free, date-ordered count series for one skill.
///
/// Invariant: one entry per calendar day between the first and last date,
/// dates strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    skill: String,
    points: Vec<DailyCount>,
}

impl DailySeries {
    /// Build a series from explicit points, checking the cadence invariant
    pub fn from_points(skill: impl Into<String>, points: Vec<DailyCount>) -> Result<Self> {
        for pair in points.windows(2) {
            let (previous, next) = (pair[0].date, pair[1].date);
            if next <= previous {
                return Err(SeriesError::Unordered { previous, next });
            }
            if previous.succ_opt() != Some(next) {
                return Err(SeriesError::Gap { previous, next });
            }
        }
        Ok(Self {
            skill: skill.into(),
            points,
        })
    }

    /// Build a series of consecutive days starting at `start`
    pub fn from_counts(skill: impl Into<String>, start: NaiveDate, counts: &[u32]) -> Self {
        let points = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DailyCount::new(start + Days::new(i as u64), count))
            .collect();
        Self {
            skill: skill.into(),
            points,
        }
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn points(&self) -> &[DailyCount] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|p| p.count)
    }

    /// Counts as floating-point observations
    pub fn values(&self) -> Vec<f64> {
        self.counts().map(f64::from).collect()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts().map(u64::from).sum()
    }

    /// Count recorded for `date`, if it lies inside the series
    pub fn count_on(&self, date: NaiveDate) -> Option<u32> {
        let first = self.first_date()?;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.points.get(offset).map(|p| p.count)
    }
}
