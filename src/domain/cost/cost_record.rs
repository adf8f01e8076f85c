use serde::Serialize;

use crate::domain::cost::estimator::CostEstimate;

/// Estimated cost of one log group within one credential context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRecord {
    log_group: String,
    #[serde(flatten)]
    estimate: CostEstimate,
}

impl CostRecord {
    pub fn new(log_group: impl Into<String>, estimate: CostEstimate) -> Self {
        Self {
            log_group: log_group.into(),
            estimate,
        }
    }

    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    pub fn ingestion_cost(&self) -> f64 {
        self.estimate.ingestion_cost
    }

    pub fn storage_cost(&self) -> f64 {
        self.estimate.storage_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.estimate.total_cost
    }
}
