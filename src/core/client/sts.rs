use std::time::SystemTime;

use anyhow::{Context, Result};
use aws_sdk_sts::config::Credentials;
use aws_sdk_sts::Client;
use tracing::debug;

use crate::core::client::aws_error::map_sdk_error;
use crate::errors::AppError;

/// ARN of the identity behind the current credentials.
pub async fn fetch_caller_arn(client: &Client) -> Result<String> {
    let identity = client
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| map_sdk_error("sts:GetCallerIdentity", e))?;

    let arn = identity
        .arn()
        .ok_or_else(|| AppError::UnexpectedResponse("GetCallerIdentity returned no ARN".into()))?;

    Ok(arn.to_string())
}

/// Assumes `role_arn` and returns temporary credentials usable by any SDK client.
pub async fn assume_role(client: &Client, role_arn: &str, session_name: &str) -> Result<Credentials> {
    let resp = client
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(session_name)
        .send()
        .await
        .map_err(|e| map_sdk_error("sts:AssumeRole", e))
        .with_context(|| format!("Failed to assume {}", role_arn))?;

    let creds = resp.credentials().ok_or_else(|| {
        AppError::UnexpectedResponse(format!("AssumeRole on {} returned no credentials", role_arn))
    })?;

    debug!("Assumed {} (session {})", role_arn, session_name);

    Ok(Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        Some(creds.session_token().to_string()),
        SystemTime::try_from(creds.expiration().clone()).ok(),
        "logcost-assume-role",
    ))
}
