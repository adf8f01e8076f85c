use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::{debug, info};

use crate::core::client::aws_client::{load_ambient_config, load_config_with_credentials};
use crate::core::client::iam::IamRoleClient;
use crate::core::client::iam_role_api_trait::IamRoleApi;
use crate::core::client::organizations::{fetch_accounts, fetch_management_account_id};
use crate::core::client::sts::{assume_role, fetch_caller_arn};
use crate::core::config::app_config::AppConfig;
use crate::domain::setup::setup_account_source_trait::SetupAccountSource;

/// Organization accounts reached from the management account's ambient credentials.
pub struct OrganizationSetupSource {
    config: Arc<AppConfig>,
    ambient: SdkConfig,
    management_account_id: String,
}

impl OrganizationSetupSource {
    pub async fn connect(config: Arc<AppConfig>) -> Result<Self> {
        let ambient = load_ambient_config(&config).await;
        let org = aws_sdk_organizations::Client::new(&ambient);
        let management_account_id = fetch_management_account_id(&org)
            .await
            .context("Failed to read organization details")?;

        info!("Management account: {}", management_account_id);
        Ok(Self {
            config,
            ambient,
            management_account_id,
        })
    }
}

#[async_trait]
impl SetupAccountSource for OrganizationSetupSource {
    fn management_account_id(&self) -> &str {
        &self.management_account_id
    }

    async fn active_accounts(&self) -> Result<Vec<String>> {
        let org = aws_sdk_organizations::Client::new(&self.ambient);
        let accounts = fetch_accounts(&org)
            .await
            .context("Failed to list organization accounts")?;
        Ok(accounts.into_iter().filter(|a| a.active).map(|a| a.id).collect())
    }

    async fn caller_arn(&self) -> Result<String> {
        fetch_caller_arn(&aws_sdk_sts::Client::new(&self.ambient)).await
    }

    async fn management_iam(&self) -> Result<Box<dyn IamRoleApi>> {
        Ok(Box::new(IamRoleClient::new(aws_sdk_iam::Client::new(&self.ambient))))
    }

    async fn member_iam(&self, account_id: &str) -> Result<Box<dyn IamRoleApi>> {
        let sts = aws_sdk_sts::Client::new(&self.ambient);
        let credentials = assume_role(
            &sts,
            &self.config.setup_role_arn(account_id),
            &self.config.setup_session_name,
        )
        .await?;

        debug!("Assumed {} in {}", self.config.setup_role_name, account_id);
        let sdk = load_config_with_credentials(&self.config, credentials).await;
        Ok(Box::new(IamRoleClient::new(aws_sdk_iam::Client::new(&sdk))))
    }
}
