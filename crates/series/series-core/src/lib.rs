//! Series Core
//!
//! Aggregates (timestamp, skill set) records into gap-free daily series
//! and reads/writes them as `date,count` tables.

pub mod builder;
pub mod codec;

pub use series_spi::{DailyCount, DailySeries, Result, SeriesError};

pub use builder::build_series;
pub use codec::{read_series, read_series_from, write_series, write_series_to};
