use anyhow::Result;
use tracing::{error, info};

use crate::core::client::iam_role_api_trait::{IamRoleApi, RoleCreation};
use crate::core::config::app_config::AppConfig;
use crate::domain::setup::role_policy::{monitor_policy, trust_policy, TrustedPrincipal, ROLE_DESCRIPTION};
use crate::domain::setup::setup_account_source_trait::SetupAccountSource;

/// One completed change to the monitor role in an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    RoleCreated,
    TrustPolicyUpdated,
    PolicyAttached,
}

/// What `setup` did in one account; `steps` holds whatever finished before any error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSetupOutcome {
    pub account_id: String,
    pub is_management: bool,
    pub steps: Vec<SetupStep>,
    pub error: Option<String>,
}

/// Creates the monitor role (or refreshes its trust policy) and attaches the inline policy.
///
/// Each step is pushed to `steps` as soon as it succeeds.
pub async fn provision_role<A>(
    api: &A,
    cfg: &AppConfig,
    principal: &TrustedPrincipal,
    steps: &mut Vec<SetupStep>,
) -> Result<()>
where
    A: IamRoleApi + ?Sized,
{
    let role_name = cfg.monitor_role_name.as_str();
    let trust = trust_policy(principal).to_string();

    match api.create_role(role_name, &trust, ROLE_DESCRIPTION).await? {
        RoleCreation::Created => steps.push(SetupStep::RoleCreated),
        RoleCreation::AlreadyExists => {
            api.update_trust_policy(role_name, &trust).await?;
            steps.push(SetupStep::TrustPolicyUpdated);
        }
    }

    api.put_inline_policy(role_name, &cfg.inline_policy_name, &monitor_policy().to_string())
        .await?;
    steps.push(SetupStep::PolicyAttached);

    Ok(())
}

/// Provisions the monitor role in every active account `source` yields.
///
/// Listing the accounts is fatal; a failing account is logged, handed to
/// `on_account` like any other and the loop moves on.
pub async fn run_setup<S, F>(
    source: &S,
    cfg: &AppConfig,
    mut on_account: F,
) -> Result<Vec<AccountSetupOutcome>>
where
    S: SetupAccountSource + ?Sized,
    F: FnMut(&AccountSetupOutcome),
{
    let accounts = source.active_accounts().await?;
    let management_id = source.management_account_id().to_string();

    let mut outcomes = Vec::with_capacity(accounts.len());
    for account_id in accounts {
        let is_management = account_id == management_id;
        info!(
            "Setting up role in account {}{}",
            account_id,
            if is_management { " (management)" } else { "" }
        );

        let mut steps = Vec::new();
        let error = match setup_account(source, cfg, &account_id, is_management, &mut steps).await {
            Ok(()) => None,
            Err(e) => {
                error!("Error setting up role in account {}: {:#}", account_id, e);
                Some(format!("{:#}", e))
            }
        };

        let outcome = AccountSetupOutcome {
            account_id,
            is_management,
            steps,
            error,
        };
        on_account(&outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// The management account trusts the caller directly; members trust the management account root.
async fn setup_account<S>(
    source: &S,
    cfg: &AppConfig,
    account_id: &str,
    is_management: bool,
    steps: &mut Vec<SetupStep>,
) -> Result<()>
where
    S: SetupAccountSource + ?Sized,
{
    let (iam, principal) = if is_management {
        let arn = source.caller_arn().await?;
        (source.management_iam().await?, TrustedPrincipal::Caller { arn })
    } else {
        let principal = TrustedPrincipal::ManagementAccount {
            account_id: source.management_account_id().to_string(),
        };
        (source.member_iam(account_id).await?, principal)
    };

    provision_role(iam.as_ref(), cfg, &principal, steps).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockIam {
        exists: bool,
        deny_create: bool,
        deny_put: bool,
        calls: Arc<Mutex<Vec<String>>>,
        documents: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl IamRoleApi for MockIam {
        async fn create_role(
            &self,
            role_name: &str,
            trust_policy: &str,
            _description: &str,
        ) -> Result<RoleCreation> {
            self.calls.lock().unwrap().push(format!("create:{role_name}"));
            self.documents.lock().unwrap().push(trust_policy.to_string());
            if self.deny_create {
                return Err(AppError::AccessDenied("iam:CreateRole".into()).into());
            }
            Ok(if self.exists { RoleCreation::AlreadyExists } else { RoleCreation::Created })
        }

        async fn update_trust_policy(&self, role_name: &str, _trust_policy: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("update:{role_name}"));
            Ok(())
        }

        async fn put_inline_policy(
            &self,
            role_name: &str,
            policy_name: &str,
            policy_document: &str,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(format!("put:{role_name}:{policy_name}"));
            if self.deny_put {
                return Err(AppError::AccessDenied("iam:PutRolePolicy".into()).into());
            }
            self.documents.lock().unwrap().push(policy_document.to_string());
            Ok(())
        }
    }

    const MANAGEMENT: &str = "111111111111";
    const CALLER: &str = "arn:aws:iam::111111111111:user/ops";

    /// Accounts in order; members listed in `unreachable` fail to assume the admin role,
    /// members in `denied` get an IAM client that refuses `CreateRole`.
    #[derive(Default)]
    struct MockSource {
        accounts: Vec<String>,
        unreachable: Vec<String>,
        denied: Vec<String>,
        trust_documents: Mutex<HashMap<String, Arc<Mutex<Vec<String>>>>>,
    }

    impl MockSource {
        fn new(accounts: &[&str]) -> Self {
            Self {
                accounts: accounts.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }
        }

        fn iam_for(&self, account_id: &str) -> Box<dyn IamRoleApi> {
            let documents = Arc::new(Mutex::new(Vec::new()));
            self.trust_documents
                .lock()
                .unwrap()
                .insert(account_id.to_string(), documents.clone());
            Box::new(MockIam {
                deny_create: self.denied.iter().any(|d| d == account_id),
                documents,
                ..Default::default()
            })
        }

        fn trust_document(&self, account_id: &str) -> String {
            self.trust_documents.lock().unwrap()[account_id].lock().unwrap()[0].clone()
        }
    }

    #[async_trait]
    impl SetupAccountSource for MockSource {
        fn management_account_id(&self) -> &str {
            MANAGEMENT
        }

        async fn active_accounts(&self) -> Result<Vec<String>> {
            Ok(self.accounts.clone())
        }

        async fn caller_arn(&self) -> Result<String> {
            Ok(CALLER.to_string())
        }

        async fn management_iam(&self) -> Result<Box<dyn IamRoleApi>> {
            Ok(self.iam_for(MANAGEMENT))
        }

        async fn member_iam(&self, account_id: &str) -> Result<Box<dyn IamRoleApi>> {
            if self.unreachable.iter().any(|u| u == account_id) {
                return Err(AppError::AccessDenied(format!("sts:AssumeRole into {account_id}")).into());
            }
            Ok(self.iam_for(account_id))
        }
    }

    fn member_principal() -> TrustedPrincipal {
        TrustedPrincipal::ManagementAccount { account_id: "999999999999".into() }
    }

    #[tokio::test]
    async fn new_role_is_created_then_policy_attached() {
        let api = MockIam::default();
        let mut steps = Vec::new();
        provision_role(&api, &AppConfig::default(), &member_principal(), &mut steps)
            .await
            .unwrap();

        assert_eq!(steps, vec![SetupStep::RoleCreated, SetupStep::PolicyAttached]);
        assert_eq!(
            *api.calls.lock().unwrap(),
            vec![
                "create:CloudWatchCostMonitorRole",
                "put:CloudWatchCostMonitorRole:CloudWatchLogsCostAccess",
            ]
        );
        let docs = api.documents.lock().unwrap();
        assert!(docs[0].contains("arn:aws:iam::999999999999:root"));
        assert!(docs[1].contains("logs:DescribeLogGroups"));
    }

    #[tokio::test]
    async fn existing_role_gets_trust_policy_refreshed() {
        let api = MockIam { exists: true, ..Default::default() };
        let mut steps = Vec::new();
        provision_role(&api, &AppConfig::default(), &member_principal(), &mut steps)
            .await
            .unwrap();

        assert_eq!(steps, vec![SetupStep::TrustPolicyUpdated, SetupStep::PolicyAttached]);
        assert_eq!(
            *api.calls.lock().unwrap(),
            vec![
                "create:CloudWatchCostMonitorRole",
                "update:CloudWatchCostMonitorRole",
                "put:CloudWatchCostMonitorRole:CloudWatchLogsCostAccess",
            ]
        );
    }

    #[tokio::test]
    async fn create_failure_stops_before_attaching_policy() {
        let api = MockIam { deny_create: true, ..Default::default() };
        let mut steps = Vec::new();
        let result =
            provision_role(&api, &AppConfig::default(), &member_principal(), &mut steps).await;

        assert!(result.is_err());
        assert!(steps.is_empty());
        assert_eq!(*api.calls.lock().unwrap(), vec!["create:CloudWatchCostMonitorRole"]);
    }

    #[tokio::test]
    async fn policy_failure_keeps_the_created_role_step() {
        let api = MockIam { deny_put: true, ..Default::default() };
        let mut steps = Vec::new();
        let result =
            provision_role(&api, &AppConfig::default(), &member_principal(), &mut steps).await;

        assert!(result.is_err());
        assert_eq!(steps, vec![SetupStep::RoleCreated]);
    }

    #[tokio::test]
    async fn failing_accounts_do_not_stop_the_loop() {
        let source = MockSource {
            unreachable: vec!["222222222222".into()],
            denied: vec!["333333333333".into()],
            ..MockSource::new(&[MANAGEMENT, "222222222222", "333333333333", "444444444444"])
        };
        let mut reported = Vec::new();

        let outcomes = run_setup(&source, &AppConfig::default(), |o| {
            reported.push(o.account_id.clone())
        })
        .await
        .unwrap();

        assert_eq!(reported, vec![MANAGEMENT, "222222222222", "333333333333", "444444444444"]);
        assert_eq!(outcomes.len(), 4);

        assert!(outcomes[0].is_management);
        assert!(outcomes[0].error.is_none());

        assert!(outcomes[1].error.as_deref().unwrap().contains("sts:AssumeRole"));
        assert!(outcomes[1].steps.is_empty());

        assert!(outcomes[2].error.as_deref().unwrap().contains("iam:CreateRole"));

        assert!(!outcomes[3].is_management);
        assert_eq!(outcomes[3].error, None);
        assert_eq!(
            outcomes[3].steps,
            vec![SetupStep::RoleCreated, SetupStep::PolicyAttached]
        );
    }

    #[tokio::test]
    async fn management_trusts_caller_and_members_trust_management_root() {
        let source = MockSource::new(&[MANAGEMENT, "444444444444"]);

        run_setup(&source, &AppConfig::default(), |_| {}).await.unwrap();

        let management_trust = source.trust_document(MANAGEMENT);
        assert!(management_trust.contains(CALLER));
        assert!(!management_trust.contains(":root"));

        let member_trust = source.trust_document("444444444444");
        assert!(member_trust.contains("arn:aws:iam::111111111111:root"));
        assert!(!member_trust.contains(CALLER));
    }
}
