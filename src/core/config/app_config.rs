use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::config::unit_price::UnitPrices;
use crate::errors::{config_error, AppError};

pub const DEFAULT_MONITOR_ROLE_NAME: &str = "CloudWatchCostMonitorRole";
pub const DEFAULT_SETUP_ROLE_NAME: &str = "OrganizationAccountAccessRole";
pub const DEFAULT_MONITOR_SESSION_NAME: &str = "CostMonitor";
pub const DEFAULT_SETUP_SESSION_NAME: &str = "CostMonitorSetup";
pub const DEFAULT_INLINE_POLICY_NAME: &str = "CloudWatchLogsCostAccess";
pub const DEFAULT_METRIC_NAMESPACE: &str = "AWS/Logs";
pub const DEFAULT_METRIC_PERIOD_SECS: i32 = 86_400;

const ENV_ROLE_NAME: &str = "LOGCOST_ROLE_NAME";
const ENV_SETUP_ROLE_NAME: &str = "LOGCOST_SETUP_ROLE_NAME";
const ENV_REGION: &str = "LOGCOST_REGION";
const ENV_INGEST_PRICE: &str = "LOGCOST_INGEST_PRICE_PER_GB";
const ENV_STORAGE_PRICE: &str = "LOGCOST_STORAGE_PRICE_PER_GB_MONTH";
const ENV_CHART_FONT: &str = "LOGCOST_CHART_FONT";

/// Runtime configuration shared by every command.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Role assumed in member accounts when collecting costs.
    #[validate(length(min = 1, max = 64))]
    pub monitor_role_name: String,
    /// Pre-existing admin role used by `setup` to reach member accounts.
    #[validate(length(min = 1, max = 64))]
    pub setup_role_name: String,
    #[validate(length(min = 2, max = 64))]
    pub monitor_session_name: String,
    #[validate(length(min = 2, max = 64))]
    pub setup_session_name: String,
    #[validate(length(min = 1, max = 128))]
    pub inline_policy_name: String,
    pub metric_namespace: String,
    #[validate(range(min = 60))]
    pub metric_period_secs: i32,
    /// Region override; the SDK default chain is used when unset.
    pub region: Option<String>,
    /// TrueType font for chart text; common system fonts are tried when unset.
    pub chart_font: Option<PathBuf>,
    #[validate(nested)]
    pub prices: UnitPrices,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            monitor_role_name: DEFAULT_MONITOR_ROLE_NAME.into(),
            setup_role_name: DEFAULT_SETUP_ROLE_NAME.into(),
            monitor_session_name: DEFAULT_MONITOR_SESSION_NAME.into(),
            setup_session_name: DEFAULT_SETUP_SESSION_NAME.into(),
            inline_policy_name: DEFAULT_INLINE_POLICY_NAME.into(),
            metric_namespace: DEFAULT_METRIC_NAMESPACE.into(),
            metric_period_secs: DEFAULT_METRIC_PERIOD_SECS,
            region: None,
            chart_font: None,
            prices: UnitPrices::default(),
        }
    }
}

impl AppConfig {
    /// Applies `LOGCOST_*` overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from defaults plus whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = non_empty(lookup(ENV_ROLE_NAME)) {
            cfg.monitor_role_name = v;
        }
        if let Some(v) = non_empty(lookup(ENV_SETUP_ROLE_NAME)) {
            cfg.setup_role_name = v;
        }
        cfg.region = non_empty(lookup(ENV_REGION));
        cfg.chart_font = non_empty(lookup(ENV_CHART_FONT)).map(PathBuf::from);

        if let Some(v) = non_empty(lookup(ENV_INGEST_PRICE)) {
            cfg.prices.ingest_per_gb = parse_price(ENV_INGEST_PRICE, &v)?;
        }
        if let Some(v) = non_empty(lookup(ENV_STORAGE_PRICE)) {
            cfg.prices.storage_per_gb_month = parse_price(ENV_STORAGE_PRICE, &v)?;
        }

        cfg.validate().map_err(config_error)?;
        Ok(cfg)
    }

    pub fn monitor_role_arn(&self, account_id: &str) -> String {
        role_arn(account_id, &self.monitor_role_name)
    }

    pub fn setup_role_arn(&self, account_id: &str) -> String {
        role_arn(account_id, &self.setup_role_name)
    }
}

pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", account_id, role_name)
}

fn parse_price(key: &str, raw: &str) -> Result<f64, AppError> {
    let value: f64 = raw
        .parse()
        .map_err(|e| AppError::ConfigError(format!("{key}={raw:?} is not a number: {e}")))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::ConfigError(format!(
            "{key} must be a non-negative finite number, got {raw}"
        )));
    }
    Ok(value)
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
