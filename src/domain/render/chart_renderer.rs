use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::debug;

use crate::domain::cost::report::Report;
use crate::errors::AppError;

pub const INGESTION_CHART_FILE: &str = "ingestion_costs.png";
pub const STORAGE_CHART_FILE: &str = "storage_costs.png";
pub const TOTAL_CHART_FILE: &str = "total_costs.png";

const FONT_FAMILY: &str = "sans-serif";
const CHART_SIZE: (u32, u32) = (1000, 600);
const X_AXIS_TITLE: &str = "Log Group (Account:Group)";
const Y_AXIS_TITLE: &str = "Cost ($)";

/// Well-known locations of a plain sans-serif TTF on Linux, macOS and Windows.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_REGISTRATION: OnceLock<Result<PathBuf, String>> = OnceLock::new();

/// One bar per `context:log_group` label, for each of the three cost kinds.
#[derive(Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub ingestion: Vec<f64>,
    pub storage: Vec<f64>,
    pub total: Vec<f64>,
}

#[derive(Debug, PartialEq)]
pub enum ChartOutcome {
    Written(Vec<PathBuf>),
    NoData,
}

impl ChartSeries {
    /// Duplicate labels keep their first position but take the latest values.
    pub fn from_report(report: &Report) -> Self {
        let mut series = ChartSeries::default();
        let mut index: HashMap<String, usize> = HashMap::new();

        for entry in report.entries() {
            let label = entry.chart_label();
            let record = &entry.record;

            match index.get(&label) {
                Some(&i) => {
                    series.ingestion[i] = record.ingestion_cost();
                    series.storage[i] = record.storage_cost();
                    series.total[i] = record.total_cost();
                }
                None => {
                    index.insert(label.clone(), series.labels.len());
                    series.labels.push(label);
                    series.ingestion.push(record.ingestion_cost());
                    series.storage.push(record.storage_cost());
                    series.total.push(record.total_cost());
                }
            }
        }

        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Writes the ingestion, storage and total bar charts into `out_dir`.
///
/// Nothing is drawn for an empty report.
pub fn render_charts(report: &Report, out_dir: &Path, font: Option<&Path>) -> Result<ChartOutcome> {
    let series = ChartSeries::from_report(report);
    if series.is_empty() {
        return Ok(ChartOutcome::NoData);
    }

    ensure_font(font)?;

    let charts = [
        (INGESTION_CHART_FILE, "Ingestion Costs by Log Group", &series.ingestion),
        (STORAGE_CHART_FILE, "Storage Costs by Log Group", &series.storage),
        (TOTAL_CHART_FILE, "Total Costs by Log Group", &series.total),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (file, title, values) in charts {
        let path = out_dir.join(file);
        draw_bar_chart(&path, title, &series.labels, values)?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(ChartOutcome::Written(written))
}

fn draw_bar_chart(path: &Path, title: &str, labels: &[String], values: &[f64]) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

    // Rotated labels need vertical room roughly proportional to their length.
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    let x_label_area = (longest * 7 + 30).clamp(60, 320);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT_FAMILY, 24))
        .margin(15)
        .x_label_area_size(x_label_area)
        .y_label_area_size(80)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..y_max)
        .map_err(render_error)?;

    let label_for = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let usd = |v: &f64| format!("${:.2}", v);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&label_for)
        .x_label_style(
            (FONT_FAMILY, 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&usd)
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(8)
                .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

/// Registers a TTF under the family name the charts use, once per process.
fn ensure_font(preferred: Option<&Path>) -> Result<()> {
    let registered = FONT_REGISTRATION.get_or_init(|| {
        let path = find_font(preferred).ok_or_else(|| {
            "no TrueType font found; set LOGCOST_CHART_FONT to a .ttf file".to_string()
        })?;
        let bytes = std::fs::read(&path)
            .map_err(|e| format!("failed to read font {}: {}", path.display(), e))?;
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        register_font(FONT_FAMILY, FontStyle::Normal, bytes)
            .map_err(|_| format!("invalid font {}", path.display()))?;
        Ok(path)
    });

    match registered {
        Ok(path) => {
            debug!("Chart font: {}", path.display());
            Ok(())
        }
        Err(msg) => Err(AppError::RenderError(msg.clone()).into()),
    }
}

fn find_font(preferred: Option<&Path>) -> Option<PathBuf> {
    preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
        .find(|p| p.is_file())
}

fn render_error<E: std::fmt::Debug>(err: E) -> AppError {
    AppError::RenderError(format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::unit_price::UnitPrices;
    use crate::core::util::time_util::CostWindow;
    use crate::domain::cost::cost_record::CostRecord;
    use crate::domain::cost::estimator::estimate;
    use crate::domain::cost::report::ContextKind;

    fn record(group: &str, ingested_gb: f64) -> CostRecord {
        CostRecord::new(group, estimate(&[ingested_gb * 1e9], &[], 30, &UnitPrices::default()))
    }

    fn report() -> Report {
        let mut report = Report::new(ContextKind::Account, CostWindow::last_days(30).unwrap());
        report.add_records("prod", vec![record("/a", 1.0), record("/b", 2.0)]);
        report.add_records("dev", vec![record("/a", 4.0)]);
        report
    }

    #[test]
    fn series_follow_report_order() {
        let series = ChartSeries::from_report(&report());
        assert_eq!(series.labels, vec!["prod:/a", "prod:/b", "dev:/a"]);
        assert_eq!(series.ingestion, vec![0.5, 1.0, 2.0]);
        assert_eq!(series.total, series.ingestion);
        assert_eq!(series.storage, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn duplicate_labels_keep_position_and_take_last_value() {
        let mut report = report();
        report.add_records("prod", vec![record("/a", 10.0)]);

        let series = ChartSeries::from_report(&report);
        assert_eq!(series.labels, vec!["prod:/a", "prod:/b", "dev:/a"]);
        assert_eq!(series.ingestion[0], 5.0);
    }

    #[test]
    fn empty_report_draws_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let empty = Report::new(ContextKind::Profile, CostWindow::last_days(30).unwrap());

        let outcome = render_charts(&empty, dir.path(), None).unwrap();

        assert_eq!(outcome, ChartOutcome::NoData);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn writes_three_png_files_when_a_font_is_available() {
        if find_font(None).is_none() {
            eprintln!(
                "skipping writes_three_png_files_when_a_font_is_available: no system font; \
                 set LOGCOST_CHART_FONT or install DejaVu/Liberation fonts"
            );
            return;
        }
        let dir = tempfile::tempdir().unwrap();

        let outcome = render_charts(&report(), dir.path(), None).unwrap();

        let expected: Vec<PathBuf> = [INGESTION_CHART_FILE, STORAGE_CHART_FILE, TOTAL_CHART_FILE]
            .iter()
            .map(|f| dir.path().join(f))
            .collect();
        assert_eq!(outcome, ChartOutcome::Written(expected.clone()));
        for path in expected {
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
