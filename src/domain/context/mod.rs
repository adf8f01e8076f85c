pub mod credential_context;
pub mod organization_provider;
pub mod profile_provider;
