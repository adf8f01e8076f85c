use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Dimension, Metric, MetricDataQuery, MetricStat};
use aws_sdk_cloudwatch::Client;
use tracing::debug;

use crate::core::client::aws_error::map_sdk_error;
use crate::core::client::metrics_reader_trait::{MetricQuery, MetricsReader};

const QUERY_ID: &str = "m1";
const LOG_GROUP_DIMENSION: &str = "LogGroupName";

/// `GetMetricData`-backed reader for the `AWS/Logs` namespace.
pub struct CloudWatchMetricsReader {
    client: Client,
    namespace: String,
    period_secs: i32,
}

impl CloudWatchMetricsReader {
    pub fn new(client: Client, namespace: impl Into<String>, period_secs: i32) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            period_secs,
        }
    }
}

/// One `GetMetricData` query for a log group: daily periods, `Sum` or `Average`.
pub fn metric_data_query(
    namespace: &str,
    period_secs: i32,
    query: &MetricQuery<'_>,
) -> MetricDataQuery {
    let dimension = Dimension::builder()
        .name(LOG_GROUP_DIMENSION)
        .value(query.log_group)
        .build();

    let metric = Metric::builder()
        .namespace(namespace)
        .metric_name(query.metric.metric_name())
        .dimensions(dimension)
        .build();

    let stat = MetricStat::builder()
        .metric(metric)
        .period(period_secs)
        .stat(query.metric.statistic())
        .build();

    MetricDataQuery::builder()
        .id(QUERY_ID)
        .metric_stat(stat)
        .return_data(true)
        .build()
}

#[async_trait]
impl MetricsReader for CloudWatchMetricsReader {
    async fn fetch_daily_values(&self, query: MetricQuery<'_>) -> Result<Vec<f64>> {
        let data_query = metric_data_query(&self.namespace, self.period_secs, &query);

        let mut values = Vec::new();
        let mut pages = self
            .client
            .get_metric_data()
            .metric_data_queries(data_query)
            .start_time(DateTime::from_secs(query.window.start.timestamp()))
            .end_time(DateTime::from_secs(query.window.end.timestamp()))
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error("cloudwatch:GetMetricData", e))?;
            for result in page.metric_data_results() {
                if result.id() == Some(QUERY_ID) {
                    values.extend_from_slice(result.values());
                }
            }
        }

        debug!(
            "{} for {}: {} sample(s)",
            query.metric.metric_name(),
            query.log_group,
            values.len()
        );
        Ok(values)
    }
}
