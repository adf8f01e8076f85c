use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::client::aws_client::load_profile_config;
use crate::core::config::app_config::AppConfig;
use crate::domain::context::credential_context::{
    ContextTarget, CredentialContext, CredentialContextProvider,
};
use crate::domain::cost::report::ContextKind;

/// Visits a fixed list of named profiles from the shared AWS config files.
pub struct ProfileContextProvider {
    config: Arc<AppConfig>,
    profiles: Vec<String>,
}

impl ProfileContextProvider {
    pub fn new(config: Arc<AppConfig>, profiles: Vec<String>) -> Self {
        Self { config, profiles }
    }
}

/// Splits `"a, b,,c"` into `["a", "b", "c"]`.
pub fn parse_profiles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl CredentialContextProvider for ProfileContextProvider {
    fn kind(&self) -> ContextKind {
        ContextKind::Profile
    }

    async fn targets(&self) -> Result<Vec<ContextTarget>> {
        Ok(self
            .profiles
            .iter()
            .map(|p| ContextTarget {
                id: p.clone(),
                label: p.clone(),
            })
            .collect())
    }

    async fn resolve(&self, target: &ContextTarget) -> Result<CredentialContext> {
        let sdk = load_profile_config(&self.config, &target.id).await;
        Ok(CredentialContext::from_sdk_config(&target.label, &sdk, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(parse_profiles("dev, prod ,,staging"), vec!["dev", "prod", "staging"]);
        assert!(parse_profiles(" , ").is_empty());
    }

    #[tokio::test]
    async fn every_profile_becomes_a_target() {
        let provider = ProfileContextProvider::new(
            Arc::new(AppConfig::default()),
            parse_profiles("dev,prod"),
        );
        let targets = provider.targets().await.unwrap();
        let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["dev", "prod"]);
        assert_eq!(provider.kind(), ContextKind::Profile);
    }
}
