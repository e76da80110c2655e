//! Cooperative wall-clock budget for a single fit

use std::time::{Duration, Instant};

use forecast_spi::{ForecastError, Result};

/// Time budget checked between solver iterations and sampling batches
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn after_millis(limit_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            limit: Duration::from_millis(limit_ms),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fail with `ForecastError::Timeout` once the budget is spent
    pub fn check(&self, stage: &'static str) -> Result<()> {
        if self.started.elapsed() >= self.limit {
            return Err(ForecastError::Timeout {
                stage,
                limit_ms: self.limit.as_millis(),
            });
        }
        Ok(())
    }
}
