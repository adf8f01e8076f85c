use anyhow::Result;
use aws_sdk_organizations::types::AccountStatus;
use aws_sdk_organizations::Client;
use tracing::debug;

use crate::core::client::aws_error::map_sdk_error;
use crate::errors::AppError;

/// One member of the organization, as far as this tool cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAccount {
    pub id: String,
    pub name: Option<String>,
    pub active: bool,
}

impl OrgAccount {
    /// Display label: the account name, or the id when the name is missing.
    pub fn label(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
            .to_string()
    }
}

pub async fn fetch_management_account_id(client: &Client) -> Result<String> {
    let resp = client
        .describe_organization()
        .send()
        .await
        .map_err(|e| map_sdk_error("organizations:DescribeOrganization", e))?;

    let id = resp
        .organization()
        .and_then(|org| org.master_account_id())
        .ok_or_else(|| {
            AppError::UnexpectedResponse("DescribeOrganization returned no management account".into())
        })?;

    Ok(id.to_string())
}

/// Every account in the organization, following pagination.
#[allow(deprecated)]
pub async fn fetch_accounts(client: &Client) -> Result<Vec<OrgAccount>> {
    let mut accounts = Vec::new();
    let mut pages = client.list_accounts().into_paginator().send();

    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| map_sdk_error("organizations:ListAccounts", e))?;

        for account in page.accounts() {
            let Some(id) = account.id() else { continue };
            accounts.push(OrgAccount {
                id: id.to_string(),
                name: account.name().map(str::to_string),
                active: matches!(account.status(), Some(AccountStatus::Active)),
            });
        }
    }

    debug!("Discovered {} organization account(s)", accounts.len());
    Ok(accounts)
}
