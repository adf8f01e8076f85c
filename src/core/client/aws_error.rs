use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};

use crate::errors::AppError;

/// AWS error codes that mean the caller is not allowed to do what it asked.
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "AuthorizationError",
    "UnauthorizedOperation",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
    "AWSOrganizationsNotInUseException",
];

pub fn is_access_denied_code(code: &str) -> bool {
    ACCESS_DENIED_CODES.contains(&code)
}

/// Maps an SDK error into an `AppError`, keeping the full source chain in the message.
pub fn map_sdk_error<E>(operation: &str, err: E) -> AppError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = format!("{}: {}", operation, DisplayErrorContext(&err));

    match err.code() {
        Some(code) if is_access_denied_code(code) => AppError::AccessDenied(message),
        _ => AppError::AwsApiError(message),
    }
}
