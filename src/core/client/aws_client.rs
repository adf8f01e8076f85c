use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use aws_sdk_sts::config::Credentials;
use tracing::debug;

use crate::core::config::app_config::AppConfig;

/// SDK config from the ambient credential chain (env, default profile, instance role).
pub async fn load_ambient_config(cfg: &AppConfig) -> SdkConfig {
    debug!("Loading ambient AWS configuration");
    base_loader(cfg).load().await
}

/// SDK config bound to a named profile from the shared config/credentials files.
pub async fn load_profile_config(cfg: &AppConfig, profile: &str) -> SdkConfig {
    debug!("Loading AWS configuration for profile '{}'", profile);
    base_loader(cfg).profile_name(profile).load().await
}

/// SDK config using fixed credentials, typically from an STS role assumption.
pub async fn load_config_with_credentials(cfg: &AppConfig, credentials: Credentials) -> SdkConfig {
    base_loader(cfg).credentials_provider(credentials).load().await
}

fn base_loader(cfg: &AppConfig) -> ConfigLoader {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    match &cfg.region {
        Some(region) => loader.region(Region::new(region.clone())),
        None => loader,
    }
}
