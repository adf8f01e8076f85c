use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::{debug, info};

use crate::core::client::aws_client::{load_ambient_config, load_config_with_credentials};
use crate::core::client::organizations::{fetch_accounts, fetch_management_account_id, OrgAccount};
use crate::core::client::sts::assume_role;
use crate::core::config::app_config::AppConfig;
use crate::domain::context::credential_context::{
    ContextTarget, CredentialContext, CredentialContextProvider,
};
use crate::domain::cost::report::ContextKind;

/// Visits every active account of the organization the ambient credentials belong to.
///
/// The management account is read with the ambient credentials; every other
/// account through the monitor role provisioned by `setup`.
pub struct OrganizationContextProvider {
    config: Arc<AppConfig>,
    ambient: SdkConfig,
    management_account_id: String,
}

impl OrganizationContextProvider {
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

/// Active accounts only, labelled by name with the id as fallback.
pub fn active_targets(accounts: &[OrgAccount]) -> Vec<ContextTarget> {
    accounts
        .iter()
        .filter(|a| a.active)
        .map(|a| ContextTarget {
            id: a.id.clone(),
            label: a.label(),
        })
        .collect()
}

#[async_trait]
impl CredentialContextProvider for OrganizationContextProvider {
    fn kind(&self) -> ContextKind {
        ContextKind::Account
    }

    async fn targets(&self) -> Result<Vec<ContextTarget>> {
        let org = aws_sdk_organizations::Client::new(&self.ambient);
        let accounts = fetch_accounts(&org)
            .await
            .context("Failed to list organization accounts")?;
        let targets = active_targets(&accounts);
        debug!("{} of {} account(s) are active", targets.len(), accounts.len());
        Ok(targets)
    }

    async fn resolve(&self, target: &ContextTarget) -> Result<CredentialContext> {
        if target.id == self.management_account_id {
            debug!("Using ambient credentials for management account {}", target.id);
            return Ok(CredentialContext::from_sdk_config(
                &target.label,
                &self.ambient,
                &self.config,
            ));
        }

        let sts = aws_sdk_sts::Client::new(&self.ambient);
        let credentials = assume_role(
            &sts,
            &self.config.monitor_role_arn(&target.id),
            &self.config.monitor_session_name,
        )
        .await?;

        let sdk = load_config_with_credentials(&self.config, credentials).await;
        Ok(CredentialContext::from_sdk_config(&target.label, &sdk, &self.config))
    }
}
