use anyhow::Result;
use async_trait::async_trait;

use crate::core::util::time_util::CostWindow;

/// The two CloudWatch Logs metrics a cost estimate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMetric {
    /// Bytes ingested per period, summed by CloudWatch.
    IncomingBytes,
    /// Bytes archived, averaged by CloudWatch over each period.
    StoredBytes,
}

impl LogMetric {
    pub fn metric_name(&self) -> &'static str {
        match self {
            LogMetric::IncomingBytes => "IncomingBytes",
            LogMetric::StoredBytes => "StoredBytes",
        }
    }

    pub fn statistic(&self) -> &'static str {
        match self {
            LogMetric::IncomingBytes => "Sum",
            LogMetric::StoredBytes => "Average",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricQuery<'a> {
    pub metric: LogMetric,
    pub log_group: &'a str,
    pub window: &'a CostWindow,
}

/// Reads one value per daily period for a log group metric.
#[async_trait]
pub trait MetricsReader: Send + Sync {
    async fn fetch_daily_values(&self, query: MetricQuery<'_>) -> Result<Vec<f64>>;
}
