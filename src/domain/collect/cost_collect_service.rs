use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::core::client::metrics_reader_trait::{LogMetric, MetricQuery};
use crate::core::config::unit_price::UnitPrices;
use crate::core::util::time_util::CostWindow;
use crate::domain::context::credential_context::{
    ContextTarget, CredentialContext, CredentialContextProvider,
};
use crate::domain::cost::cost_record::CostRecord;
use crate::domain::cost::estimator::estimate;
use crate::domain::cost::report::{ContextFailure, ContextKind, Report};
use crate::errors::{classify_failure, FailureKind};

/// Result of visiting one credential context.
#[derive(Debug)]
pub enum ContextOutcome {
    Collected {
        label: String,
        records: Vec<CostRecord>,
    },
    Failed(ContextFailure),
}

/// Visits every context the provider yields, one after another, and gathers a report.
///
/// Only a failure to enumerate the contexts is returned as an error; a failing
/// context is logged, recorded in the report, and contributes no records.
pub async fn build_report<P>(provider: &P, window: CostWindow, prices: &UnitPrices) -> Result<Report>
where
    P: CredentialContextProvider + ?Sized,
{
    let kind = provider.kind();
    let targets = provider.targets().await?;
    info!("Collecting costs for {} {}(s) over {} day(s)", targets.len(), kind.noun(), window.days);

    let mut report = Report::new(kind, window);
    for target in &targets {
        match attempt_context(provider, target, &window, prices).await {
            ContextOutcome::Collected { label, records } => {
                info!("{} {}: {} log group(s)", kind.heading(), label, records.len());
                report.add_records(&label, records);
            }
            ContextOutcome::Failed(failure) => report.add_failure(failure),
        }
    }

    Ok(report)
}

/// Resolves one context and collects its costs; never fails, only reports.
pub async fn attempt_context<P>(
    provider: &P,
    target: &ContextTarget,
    window: &CostWindow,
    prices: &UnitPrices,
) -> ContextOutcome
where
    P: CredentialContextProvider + ?Sized,
{
    match resolve_and_collect(provider, target, window, prices).await {
        Ok(records) => ContextOutcome::Collected {
            label: target.label.clone(),
            records,
        },
        Err(err) => {
            let failure = ContextFailure {
                context: target.label.clone(),
                kind: classify_failure(&err),
                reason: format!("{:#}", err),
            };
            log_failure(provider.kind(), &failure);
            ContextOutcome::Failed(failure)
        }
    }
}

async fn resolve_and_collect<P>(
    provider: &P,
    target: &ContextTarget,
    window: &CostWindow,
    prices: &UnitPrices,
) -> Result<Vec<CostRecord>>
where
    P: CredentialContextProvider + ?Sized,
{
    let ctx = provider.resolve(target).await?;
    collect_context_costs(&ctx, window, prices).await
}

/// Lists the context's log groups and estimates each one.
pub async fn collect_context_costs(
    ctx: &CredentialContext,
    window: &CostWindow,
    prices: &UnitPrices,
) -> Result<Vec<CostRecord>> {
    let log_groups = ctx
        .logs
        .list_log_groups()
        .await
        .context("Failed to list log groups")?;

    let mut records = Vec::with_capacity(log_groups.len());
    for log_group in log_groups {
        let ingested = fetch(ctx, LogMetric::IncomingBytes, &log_group, window).await?;
        let stored = fetch(ctx, LogMetric::StoredBytes, &log_group, window).await?;

        let est = estimate(&ingested, &stored, window.days, prices);
        debug!("{} {}: ${:.4}", ctx.label, log_group, est.total_cost);
        records.push(CostRecord::new(log_group, est));
    }

    Ok(records)
}

async fn fetch(
    ctx: &CredentialContext,
    metric: LogMetric,
    log_group: &str,
    window: &CostWindow,
) -> Result<Vec<f64>> {
    let query = MetricQuery {
        metric,
        log_group,
        window,
    };
    ctx.metrics
        .fetch_daily_values(query)
        .await
        .with_context(|| format!("Failed to read {} for {}", metric.metric_name(), log_group))
}

fn log_failure(kind: ContextKind, failure: &ContextFailure) {
    match failure.kind {
        FailureKind::AccessDenied => error!(
            "Client error in {} {}: {}",
            kind.noun(),
            failure.context,
            failure.reason
        ),
        FailureKind::Other => error!("Error in {} {}: {}", kind.noun(), failure.context, failure.reason),
    }
}
