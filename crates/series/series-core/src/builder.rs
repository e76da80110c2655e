//! Time-series builder
//!
//! Explodes each record into one (day, skill) pair per mentioned skill,
//! counts pairs per skill and UTC calendar day, then zero-fills every
//! missing day between a skill's first and last mention.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use series_spi::DailySeries;

/// Build one daily series per skill mentioned at least once.
///
/// The result is keyed and ordered by skill name and does not depend on
/// the order of `records`.
pub fn build_series<I, S>(records: I) -> BTreeMap<String, DailySeries>
where
    I: IntoIterator<Item = (DateTime<Utc>, S)>,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    let mut tallies: BTreeMap<String, BTreeMap<NaiveDate, u32>> = BTreeMap::new();

    for (timestamp, skills) in records {
        let day = timestamp.date_naive();
        for skill in skills {
            *tallies
                .entry(skill.as_ref().to_string())
                .or_default()
                .entry(day)
                .or_insert(0) += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(skill, days)| {
            let series = fill_days(&skill, &days);
            debug!(skill = %skill, days = series.len(), mentions = series.total(), "built series");
            (skill, series)
        })
        .collect()
}

fn fill_days(skill: &str, days: &BTreeMap<NaiveDate, u32>) -> DailySeries {
    let Some((&first, _)) = days.first_key_value() else {
        return DailySeries::from_counts(skill, NaiveDate::MIN, &[]);
    };
    let last = days.last_key_value().map_or(first, |(day, _)| *day);

    let counts: Vec<u32> = first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| days.get(&day).copied().unwrap_or(0))
        .collect();
    DailySeries::from_counts(skill, first, &counts)
}
