use std::sync::Arc;

use anyhow::{bail, Result};

use crate::core::config::app_config::AppConfig;
use crate::domain::context::credential_context::CredentialContextProvider;
use crate::domain::context::organization_provider::OrganizationContextProvider;
use crate::domain::context::profile_provider::{parse_profiles, ProfileContextProvider};
use crate::domain::setup::organization_setup_source::OrganizationSetupSource;

/// Shared state handed to every command.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

pub fn build_app_state(config: AppConfig) -> AppState {
    AppState {
        config: Arc::new(config),
    }
}

impl AppState {
    /// Profile mode when `--profiles` is given, organization mode otherwise.
    pub async fn context_provider(
        &self,
        profiles: Option<&str>,
    ) -> Result<Box<dyn CredentialContextProvider>> {
        match profiles {
            Some(raw) => {
                let profiles = parse_profiles(raw);
                if profiles.is_empty() {
                    bail!("--profiles was given but names no profile");
                }
                Ok(Box::new(ProfileContextProvider::new(self.config.clone(), profiles)))
            }
            None => Ok(Box::new(
                OrganizationContextProvider::connect(self.config.clone()).await?,
            )),
        }
    }

    /// `setup` always works across the organization the ambient credentials manage.
    pub async fn setup_source(&self) -> Result<OrganizationSetupSource> {
        OrganizationSetupSource::connect(self.config.clone()).await
    }
}
