//! Human and JSON rendering of a run.

use std::collections::BTreeMap;

use redtxn_coordinator::{CoordinatorMetrics, TransactionOutcome};
use redtxn_core::{Error, TransactionPlan};
use serde::Serialize;

/// Output format, chosen by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Everything printed after a run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub plan: TransactionPlan,
    #[serde(flatten)]
    pub result: RunResult,
    pub round_trips: usize,
    pub state: BTreeMap<String, String>,
}

/// Outcome, or the error that prevented one.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RunResult {
    Outcome(TransactionOutcome),
    Error { outcome: &'static str, error: String },
}

impl RunResult {
    pub fn from_result(result: Result<TransactionOutcome, Error>) -> Self {
        match result {
            Ok(outcome) => RunResult::Outcome(outcome),
            Err(e) => RunResult::Error {
                outcome: if e.is_validation() { "invalid" } else { "connection_error" },
                error: e.to_string(),
            },
        }
    }

    /// Process exit code: 0 commit, 2 rolled back, 3 store state uncertain,
    /// 1 anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunResult::Outcome(outcome) if !outcome.is_restored() => 3,
            RunResult::Outcome(TransactionOutcome::Committed { .. }) => 0,
            RunResult::Outcome(_) => 2,
            RunResult::Error { outcome, .. } if *outcome == "connection_error" => 3,
            RunResult::Error { .. } => 1,
        }
    }
}

pub fn format_report(report: &Report, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => format_human(report),
    }
}

fn format_human(report: &Report) -> String {
    let mut lines = Vec::new();

    for (i, (main, rollback)) in report.plan.steps().enumerate() {
        lines.push(format!("{:>3}) {:<24} undo: {}", i, main.to_string(), rollback));
    }
    lines.push(String::new());

    match &report.result {
        RunResult::Outcome(TransactionOutcome::Committed { replies }) => {
            lines.push("COMMITTED".to_string());
            for (i, reply) in replies.iter().enumerate() {
                lines.push(format!("{:>3}) {}", i, reply));
            }
        }
        RunResult::Outcome(TransactionOutcome::RolledBack {
            failures,
            compensation_errors,
        }) => {
            if compensation_errors.is_empty() {
                lines.push("ROLLED BACK".to_string());
            } else {
                lines.push("ROLLED BACK (not fully restored)".to_string());
            }
            for f in failures {
                lines.push(format!("  failed {}", f));
            }
            for f in compensation_errors {
                lines.push(format!("  (warning) undo rejected {}", f));
            }
        }
        RunResult::Outcome(TransactionOutcome::CompensationFailed { failures, error }) => {
            lines.push("COMPENSATION FAILED".to_string());
            for f in failures {
                lines.push(format!("  failed {}", f));
            }
            lines.push(format!("  compensation: {}", error));
        }
        RunResult::Error { error, .. } => {
            lines.push(format!("(error) {}", error));
        }
    }

    lines.push(String::new());
    lines.push(format!("round trips: {}", report.round_trips));
    for (key, value) in &report.state {
        lines.push(format!("{} = {:?}", key, value));
    }

    lines.join("\n")
}

pub fn format_metrics(metrics: &CoordinatorMetrics) -> String {
    format!(
        "committed={} rolled_back={} connection_failures={} compensation_failures={}",
        metrics.committed,
        metrics.rolled_back,
        metrics.connection_failures,
        metrics.compensation_failures
    )
}
