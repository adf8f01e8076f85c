use crate::core::config::unit_price::UnitPrices;

/// CloudWatch bills in decimal gigabytes.
pub const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Storage rates are quoted per 30-day month.
pub const DAYS_PER_BILLING_MONTH: f64 = 30.0;

pub struct CostUtil;

impl CostUtil {
    #[inline]
    pub fn bytes_to_gb(bytes: f64) -> f64 {
        bytes / BYTES_PER_GB
    }

    /// Scales an average stored volume to GB-months for a window of `days`.
    ///
    /// Assumes the stored volume held constant across the window.
    #[inline]
    pub fn gb_to_gb_months(avg_gb: f64, days: u32) -> f64 {
        avg_gb * (f64::from(days) / DAYS_PER_BILLING_MONTH)
    }

    #[inline]
    pub fn compute_ingestion_cost(ingested_gb: f64, prices: &UnitPrices) -> f64 {
        ingested_gb * prices.ingest_per_gb
    }

    #[inline]
    pub fn compute_storage_cost(gb_months: f64, prices: &UnitPrices) -> f64 {
        gb_months * prices.storage_per_gb_month
    }

    pub fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    /// Arithmetic mean; an empty slice yields 0 rather than NaN.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        Self::sum(values) / values.len() as f64
    }
}
