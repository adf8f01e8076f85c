use serde_json::{json, Value};

pub const ROLE_DESCRIPTION: &str = "Role for cross-account CloudWatch Logs cost monitoring";

/// Read-only actions the monitor role needs to estimate costs.
pub const MONITOR_ACTIONS: &[&str] = &[
    "logs:DescribeLogGroups",
    "cloudwatch:GetMetricData",
    "cloudwatch:GetMetricStatistics",
    "cloudwatch:ListMetrics",
];

/// Principal allowed to assume the monitor role in an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustedPrincipal {
    /// The identity running `setup`; used in the management account itself.
    Caller { arn: String },
    /// Any principal of the management account; used in member accounts.
    ManagementAccount { account_id: String },
}

impl TrustedPrincipal {
    pub fn arn(&self) -> String {
        match self {
            TrustedPrincipal::Caller { arn } => arn.clone(),
            TrustedPrincipal::ManagementAccount { account_id } => {
                format!("arn:aws:iam::{}:root", account_id)
            }
        }
    }
}

pub fn trust_policy(principal: &TrustedPrincipal) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": { "AWS": principal.arn() },
            "Action": "sts:AssumeRole"
        }]
    })
}

pub fn monitor_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": MONITOR_ACTIONS,
            "Resource": "*"
        }]
    })
}
