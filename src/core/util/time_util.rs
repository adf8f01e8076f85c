use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Look-back window a report covers: `[end - days, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostWindow {
    pub days: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CostWindow {
    pub fn ending_at(end: DateTime<Utc>, days: u32) -> Result<Self> {
        if days == 0 {
            bail!("window must cover at least one day");
        }
        let start = end - Duration::days(i64::from(days));
        Ok(Self { days, start, end })
    }

    pub fn last_days(days: u32) -> Result<Self> {
        Self::ending_at(Utc::now(), days)
    }
}
