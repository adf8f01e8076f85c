use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::app_state::AppState;
use crate::core::util::time_util::CostWindow;
use crate::domain::collect::cost_collect_service::build_report;
use crate::domain::cost::report::Report;
use crate::domain::render::chart_renderer::{render_charts, ChartOutcome};
use crate::domain::render::table_renderer::{render_json, render_table, NO_DATA_MESSAGE};
use crate::domain::setup::role_setup_service::{run_setup, AccountSetupOutcome, SetupStep};

/// CloudWatch Logs cost monitor across organization accounts or local profiles
#[derive(Parser, Debug)]
#[command(name = "logcost", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Setup IAM roles in all member accounts for cross-account access
    Setup,

    /// Summarize CloudWatch Logs costs by account (or profile) and log group
    Summarize(SummarizeArgs),

    /// Graph CloudWatch Logs costs by account (or profile) and log group as PNG files
    Graph(GraphArgs),
}

#[derive(Args, Debug)]
pub struct ScopeArgs {
    /// Number of days to estimate costs for
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Comma-separated local profiles to use instead of organization accounts
    #[arg(long)]
    pub profiles: Option<String>,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Directory the PNG files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub async fn run(self, state: AppState) -> Result<()> {
        match self.command {
            Commands::Setup => setup(state).await,
            Commands::Summarize(args) => summarize(state, args).await,
            Commands::Graph(args) => graph(state, args).await,
        }
    }
}

async fn collect(state: &AppState, scope: &ScopeArgs) -> Result<Report> {
    let window = CostWindow::last_days(scope.days)?;
    let provider = state.context_provider(scope.profiles.as_deref()).await?;
    build_report(provider.as_ref(), window, &state.config.prices).await
}

async fn summarize(state: AppState, args: SummarizeArgs) -> Result<()> {
    let report = collect(&state, &args.scope).await?;

    match args.format {
        OutputFormat::Table => println!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}

async fn graph(state: AppState, args: GraphArgs) -> Result<()> {
    let report = collect(&state, &args.scope).await?;

    match render_charts(&report, &args.output_dir, state.config.chart_font.as_deref())? {
        ChartOutcome::NoData => println!("{}", NO_DATA_MESSAGE),
        ChartOutcome::Written(paths) => {
            let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            println!("Graphs saved as PNG files: {}", names.join(", "));
        }
    }
    Ok(())
}

async fn setup(state: AppState) -> Result<()> {
    let source = state.setup_source().await?;
    let role = state.config.monitor_role_name.clone();

    let outcomes = run_setup(&source, &state.config, |outcome| {
        for line in setup_lines(&role, outcome) {
            println!("{}", line);
        }
    })
    .await?;

    if outcomes.is_empty() {
        println!("No active accounts found.");
    }
    Ok(())
}

/// User-facing lines for one account, completed steps first, then any error.
fn setup_lines(role: &str, outcome: &AccountSetupOutcome) -> Vec<String> {
    let account = if outcome.is_management {
        format!("{} (management)", outcome.account_id)
    } else {
        outcome.account_id.clone()
    };

    let mut lines: Vec<String> = outcome
        .steps
        .iter()
        .map(|step| match step {
            SetupStep::RoleCreated => format!("Role {} created in account {}", role, account),
            SetupStep::TrustPolicyUpdated => format!(
                "Role {} already exists; trust policy updated in account {}",
                role, account
            ),
            SetupStep::PolicyAttached => format!("Policy attached to role in account {}", account),
        })
        .collect();

    if let Some(reason) = &outcome.error {
        lines.push(format!("Error setting up role in account {}: {}", account, reason));
    }
    lines
}
