use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("AWS API error: {0}")]
    AwsApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// How a failed credential context is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    AccessDenied,
    Other,
}

/// Helper for mapping any unknown error into a configuration error
pub fn config_error<E: ToString>(err: E) -> AppError {
    AppError::ConfigError(err.to_string())
}

/// Decides which failure kind an error chain belongs to.
///
/// Only an `AppError::AccessDenied` anywhere in the chain counts as an access
/// failure; everything else is `Other`.
pub fn classify_failure(err: &anyhow::Error) -> FailureKind {
    let denied = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<AppError>())
        .any(|app| matches!(app, AppError::AccessDenied(_)));

    if denied {
        FailureKind::AccessDenied
    } else {
        FailureKind::Other
    }
}
