use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_iam::Client;
use tracing::debug;

use crate::core::client::aws_error::map_sdk_error;
use crate::core::client::iam_role_api_trait::{IamRoleApi, RoleCreation};

pub struct IamRoleClient {
    client: Client,
}

impl IamRoleClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IamRoleApi for IamRoleClient {
    async fn create_role(
        &self,
        role_name: &str,
        trust_policy: &str,
        description: &str,
    ) -> Result<RoleCreation> {
        let result = self
            .client
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(trust_policy)
            .description(description)
            .send()
            .await;

        match result {
            Ok(_) => Ok(RoleCreation::Created),
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_entity_already_exists_exception())
                    .unwrap_or(false) =>
            {
                debug!("Role {} already exists", role_name);
                Ok(RoleCreation::AlreadyExists)
            }
            Err(err) => Err(map_sdk_error("iam:CreateRole", err).into()),
        }
    }

    async fn update_trust_policy(&self, role_name: &str, trust_policy: &str) -> Result<()> {
        self.client
            .update_assume_role_policy()
            .role_name(role_name)
            .policy_document(trust_policy)
            .send()
            .await
            .map_err(|e| map_sdk_error("iam:UpdateAssumeRolePolicy", e))?;
        Ok(())
    }

    async fn put_inline_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<()> {
        self.client
            .put_role_policy()
            .role_name(role_name)
            .policy_name(policy_name)
            .policy_document(policy_document)
            .send()
            .await
            .map_err(|e| map_sdk_error("iam:PutRolePolicy", e))?;
        Ok(())
    }
}
