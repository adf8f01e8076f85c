pub mod organization_setup_source;
pub mod role_policy;
pub mod role_setup_service;
pub mod setup_account_source_trait;
