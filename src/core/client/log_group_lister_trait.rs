use anyhow::Result;
use async_trait::async_trait;

/// Enumerates the log groups visible to one credential context.
#[async_trait]
pub trait LogGroupLister: Send + Sync {
    async fn list_log_groups(&self) -> Result<Vec<String>>;
}
