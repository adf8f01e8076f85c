// AWS SDK adapters
pub mod aws_client;
pub mod aws_error;
pub mod cloudwatch;
pub mod iam;
pub mod logs;
pub mod organizations;
pub mod sts;

// Seams the domain services are written against
pub mod iam_role_api_trait;
pub mod log_group_lister_trait;
pub mod metrics_reader_trait;
