use tabled::builder::Builder;
use tabled::settings::Style;

use crate::domain::cost::report::Report;

pub const NO_DATA_MESSAGE: &str = "No costs found or access issues.";

pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Grid table of every report entry, or the no-data message for an empty report.
pub fn render_table(report: &Report) -> String {
    if report.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        report.context_kind.heading(),
        "LogGroup",
        "IngestionCost",
        "StorageCost",
        "TotalCost",
    ]);

    for entry in report.entries() {
        builder.push_record([
            entry.context.clone(),
            entry.record.log_group().to_string(),
            format_usd(entry.record.ingestion_cost()),
            format_usd(entry.record.storage_cost()),
            format_usd(entry.record.total_cost()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

/// Pretty JSON of the whole report, failures included.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::unit_price::UnitPrices;
    use crate::core::util::time_util::CostWindow;
    use crate::domain::cost::cost_record::CostRecord;
    use crate::domain::cost::estimator::estimate;
    use crate::domain::cost::report::ContextKind;

    fn sample_report(kind: ContextKind) -> Report {
        let mut report = Report::new(kind, CostWindow::last_days(30).unwrap());
        report.add_records(
            "prod",
            vec![CostRecord::new(
                "/aws/lambda/api",
                estimate(&[1e9, 2e9], &[3e9, 3e9], 30, &UnitPrices::default()),
            )],
        );
        report
    }

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_usd(1.5), "$1.50");
        assert_eq!(format_usd(0.094), "$0.09");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn empty_report_prints_fallback() {
        let report = Report::new(ContextKind::Account, CostWindow::last_days(7).unwrap());
        assert_eq!(render_table(&report), NO_DATA_MESSAGE);
    }

    #[test]
    fn table_lists_costs_under_context_heading() {
        let table = render_table(&sample_report(ContextKind::Profile));

        assert!(table.contains("Profile"));
        assert!(table.contains("LogGroup"));
        assert!(table.contains("/aws/lambda/api"));
        assert!(table.contains("$1.50"));
        assert!(table.contains("$0.09"));
        assert!(table.contains("$1.59"));
        assert!(table.starts_with('+'));
    }

    #[test]
    fn json_includes_entries_and_costs() {
        let json = render_json(&sample_report(ContextKind::Account)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["context_kind"], "account");
        assert_eq!(value["entries"][0]["context"], "prod");
        assert_eq!(value["entries"][0]["log_group"], "/aws/lambda/api");
        assert!((value["entries"][0]["total_cost"].as_f64().unwrap() - 1.59).abs() < 1e-9);
        assert_eq!(value["failures"].as_array().unwrap().len(), 0);
    }
}
