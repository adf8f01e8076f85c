use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::Client;
use tracing::debug;

use crate::core::client::aws_error::map_sdk_error;
use crate::core::client::log_group_lister_trait::LogGroupLister;

/// `DescribeLogGroups`-backed lister.
pub struct CloudWatchLogsLister {
    client: Client,
}

impl CloudWatchLogsLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogGroupLister for CloudWatchLogsLister {
    async fn list_log_groups(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut pages = self.client.describe_log_groups().into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error("logs:DescribeLogGroups", e))?;
            names.extend(
                page.log_groups()
                    .iter()
                    .filter_map(|group| group.log_group_name())
                    .map(str::to_string),
            );
        }

        debug!("Discovered {} log group(s)", names.len());
        Ok(names)
    }
}
