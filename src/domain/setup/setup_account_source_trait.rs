use anyhow::Result;
use async_trait::async_trait;

use crate::core::client::iam_role_api_trait::IamRoleApi;

/// Where `setup` finds its accounts and the IAM access to provision each one.
#[async_trait]
pub trait SetupAccountSource: Send + Sync {
    fn management_account_id(&self) -> &str;

    /// Ids of the accounts to provision, management account included.
    async fn active_accounts(&self) -> Result<Vec<String>>;

    /// ARN of the identity running `setup`.
    async fn caller_arn(&self) -> Result<String>;

    /// IAM in the management account, using the caller's own credentials.
    async fn management_iam(&self) -> Result<Box<dyn IamRoleApi>>;

    /// IAM in a member account, reached through the organization admin role.
    async fn member_iam(&self, account_id: &str) -> Result<Box<dyn IamRoleApi>>;
}
