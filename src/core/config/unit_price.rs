use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_INGEST_PRICE_PER_GB: f64 = 0.50;
pub const DEFAULT_STORAGE_PRICE_PER_GB_MONTH: f64 = 0.03;

/// Flat published CloudWatch Logs rates, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct UnitPrices {
    /// Charge per GB ingested.
    #[validate(range(min = 0.0))]
    pub ingest_per_gb: f64,
    /// Charge per GB-month archived.
    #[validate(range(min = 0.0))]
    pub storage_per_gb_month: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        Self {
            ingest_per_gb: DEFAULT_INGEST_PRICE_PER_GB,
            storage_per_gb_month: DEFAULT_STORAGE_PRICE_PER_GB_MONTH,
        }
    }
}
