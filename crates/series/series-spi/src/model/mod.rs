//! Model module containing data structures

mod daily_series;

pub use daily_series::{DailyCount, DailySeries};
