use serde::Serialize;

use crate::core::config::unit_price::UnitPrices;
use crate::core::util::cost_util::CostUtil;

/// Cost of one log group over one window, with the volumes it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    pub ingestion_gb: f64,
    pub avg_storage_gb: f64,
    pub storage_gb_month: f64,
    pub ingestion_cost: f64,
    pub storage_cost: f64,
    pub total_cost: f64,
}

/// Reduces daily samples to a cost estimate.
///
/// `ingested` holds per-day ingested bytes (summed), `stored` per-day average
/// stored bytes. Either may be empty for an idle log group, which costs 0.
/// Stored volume is averaged and then scaled linearly by `window_days / 30`
/// to express it in GB-months.
pub fn estimate(
    ingested: &[f64],
    stored: &[f64],
    window_days: u32,
    prices: &UnitPrices,
) -> CostEstimate {
    let ingestion_gb = CostUtil::bytes_to_gb(CostUtil::sum(ingested));
    let avg_storage_gb = CostUtil::bytes_to_gb(CostUtil::mean(stored));
    let storage_gb_month = CostUtil::gb_to_gb_months(avg_storage_gb, window_days);

    let ingestion_cost = CostUtil::compute_ingestion_cost(ingestion_gb, prices);
    let storage_cost = CostUtil::compute_storage_cost(storage_gb_month, prices);

    CostEstimate {
        ingestion_gb,
        avg_storage_gb,
        storage_gb_month,
        ingestion_cost,
        storage_cost,
        total_cost: ingestion_cost + storage_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn thirty_day_scenario() {
        let est = estimate(&[1e9, 2e9], &[3e9, 3e9], 30, &UnitPrices::default());

        assert!(approx(est.ingestion_gb, 3.0));
        assert!(approx(est.ingestion_cost, 1.50));
        assert!(approx(est.avg_storage_gb, 3.0));
        assert!(approx(est.storage_gb_month, 3.0));
        assert!(approx(est.storage_cost, 0.09));
        assert!(approx(est.total_cost, 1.59));
    }

    #[test]
    fn idle_log_group_costs_nothing() {
        let est = estimate(&[], &[], 30, &UnitPrices::default());

        assert_eq!(est.ingestion_cost, 0.0);
        assert_eq!(est.storage_cost, 0.0);
        assert_eq!(est.total_cost, 0.0);
    }

    #[test]
    fn sixty_days_doubles_storage_months() {
        let stored = vec![10e9; 45];
        let est = estimate(&[], &stored, 60, &UnitPrices::default());

        assert!(approx(est.avg_storage_gb, 10.0));
        assert!(approx(est.storage_gb_month, 20.0));
        assert!(approx(est.storage_cost, 0.60));
    }

    #[test]
    fn empty_ingestion_ignores_storage() {
        let est = estimate(&[], &[5e9, 7e9], 30, &UnitPrices::default());
        assert_eq!(est.ingestion_cost, 0.0);
        assert!(est.storage_cost > 0.0);
    }

    #[test]
    fn empty_storage_ignores_ingestion() {
        let est = estimate(&[4e9], &[], 7, &UnitPrices::default());
        assert_eq!(est.storage_cost, 0.0);
        assert!(approx(est.ingestion_cost, 2.0));
    }

    #[test]
    fn thirty_days_applies_no_scaling() {
        let prices = UnitPrices { ingest_per_gb: 0.0, storage_per_gb_month: 0.03 };
        let est = estimate(&[], &[2e9, 4e9, 6e9], 30, &prices);
        assert_eq!(est.storage_gb_month, est.avg_storage_gb);
        assert_eq!(est.storage_cost, est.avg_storage_gb * prices.storage_per_gb_month);
    }

    #[test]
    fn costs_stay_finite_and_add_up() {
        let prices = UnitPrices { ingest_per_gb: 0.57, storage_per_gb_month: 0.033 };
        let cases: Vec<(Vec<f64>, Vec<f64>, u32)> = vec![
            (vec![], vec![], 1),
            (vec![0.0; 3], vec![0.0], 3),
            (vec![123_456.0, 9.9e12], vec![1.0], 365),
            (vec![1e15; 90], vec![2.5e12; 90], 90),
            (vec![17.0], vec![8e9, 0.0, 3e9], 11),
        ];

        for (ingested, stored, days) in cases {
            let est = estimate(&ingested, &stored, days, &prices);
            for value in [est.ingestion_cost, est.storage_cost, est.total_cost] {
                assert!(value.is_finite() && value >= 0.0, "bad value {value} for {days} days");
            }
            assert_eq!(est.total_cost, est.ingestion_cost + est.storage_cost);
        }
    }
}
