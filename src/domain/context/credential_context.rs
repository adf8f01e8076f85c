use anyhow::Result;
use async_trait::async_trait;
use aws_config::SdkConfig;

use crate::core::client::cloudwatch::CloudWatchMetricsReader;
use crate::core::client::log_group_lister_trait::LogGroupLister;
use crate::core::client::logs::CloudWatchLogsLister;
use crate::core::client::metrics_reader_trait::MetricsReader;
use crate::core::config::app_config::AppConfig;
use crate::domain::cost::report::ContextKind;

/// Something costs can be collected under: an account id or a profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTarget {
    pub id: String,
    pub label: String,
}

/// A resolved identity with the two capabilities cost collection needs.
pub struct CredentialContext {
    pub label: String,
    pub logs: Box<dyn LogGroupLister>,
    pub metrics: Box<dyn MetricsReader>,
}

impl CredentialContext {
    pub fn new(
        label: impl Into<String>,
        logs: Box<dyn LogGroupLister>,
        metrics: Box<dyn MetricsReader>,
    ) -> Self {
        Self {
            label: label.into(),
            logs,
            metrics,
        }
    }

    /// Wires the CloudWatch Logs and CloudWatch clients for an SDK config.
    pub fn from_sdk_config(label: impl Into<String>, sdk: &SdkConfig, cfg: &AppConfig) -> Self {
        let logs = CloudWatchLogsLister::new(aws_sdk_cloudwatchlogs::Client::new(sdk));
        let metrics = CloudWatchMetricsReader::new(
            aws_sdk_cloudwatch::Client::new(sdk),
            cfg.metric_namespace.clone(),
            cfg.metric_period_secs,
        );
        Self::new(label, Box::new(logs), Box::new(metrics))
    }
}

/// Yields the credential contexts a report spans.
#[async_trait]
pub trait CredentialContextProvider: Send + Sync {
    fn kind(&self) -> ContextKind;

    /// Lists the contexts to visit. Failing here aborts the whole run.
    async fn targets(&self) -> Result<Vec<ContextTarget>>;

    /// Resolves credentials for one target. Failures are isolated to that target.
    async fn resolve(&self, target: &ContextTarget) -> Result<CredentialContext>;
}
