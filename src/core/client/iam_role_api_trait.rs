use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCreation {
    Created,
    AlreadyExists,
}

/// The IAM calls role provisioning needs, scoped to one account.
#[async_trait]
pub trait IamRoleApi: Send + Sync {
    /// Creates the role; an existing role is reported, not treated as an error.
    async fn create_role(
        &self,
        role_name: &str,
        trust_policy: &str,
        description: &str,
    ) -> Result<RoleCreation>;

    async fn update_trust_policy(&self, role_name: &str, trust_policy: &str) -> Result<()>;

    async fn put_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<()>;
}
