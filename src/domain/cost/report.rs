use serde::Serialize;

use crate::core::util::time_util::CostWindow;
use crate::domain::cost::cost_record::CostRecord;
use crate::errors::FailureKind;

/// What a credential context represents, used for headings and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Account,
    Profile,
}

impl ContextKind {
    pub fn heading(&self) -> &'static str {
        match self {
            ContextKind::Account => "Account",
            ContextKind::Profile => "Profile",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            ContextKind::Account => "account",
            ContextKind::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub context: String,
    #[serde(flatten)]
    pub record: CostRecord,
}

impl ReportEntry {
    /// `context:log_group`, the label used on chart axes.
    pub fn chart_label(&self) -> String {
        format!("{}:{}", self.context, self.record.log_group())
    }
}

/// A credential context that contributed no records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextFailure {
    pub context: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Costs collected during one command invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub context_kind: ContextKind,
    pub window: CostWindow,
    entries: Vec<ReportEntry>,
    failures: Vec<ContextFailure>,
}

impl Report {
    pub fn new(context_kind: ContextKind, window: CostWindow) -> Self {
        Self {
            context_kind,
            window,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn add_records(&mut self, context: &str, records: Vec<CostRecord>) {
        self.entries.extend(records.into_iter().map(|record| ReportEntry {
            context: context.to_string(),
            record,
        }));
    }

    pub fn add_failure(&mut self, failure: ContextFailure) {
        self.failures.push(failure);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn failures(&self) -> &[ContextFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
