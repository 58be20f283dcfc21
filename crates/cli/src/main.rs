//! redtxn CLI: run compensating transactions against an in-memory store.
//!
//! - `redtxn demo`: the canonical three-counter scenario with one bad value
//! - `redtxn run --plan plan.json`: any plan, with optional seed data,
//!   configuration, latency, timeout and a forced compensation failure
//!
//! Logs go to stderr (`RUST_LOG`, default `redtxn=info`); the report goes
//! to stdout.

mod commands;
mod format;
mod parse;

use std::collections::BTreeMap;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use redtxn_client::{Fault, MemoryStore, StoreClient, TimeoutClient};
use redtxn_coordinator::{CoordinatorConfig, TransactionCoordinator};
use redtxn_core::{TransactionPlan, Value};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::build_cli;
use format::{format_metrics, format_report, OutputMode, Report, RunResult};
use parse::{demo_plan, matches_to_action, CliAction, RunOptions};

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    init_logging(matches.get_flag("verbose"));

    let opts = match matches_to_action(&matches) {
        Ok(CliAction::Demo { fail_compensation }) => {
            let (plan, seed) = demo_plan();
            RunOptions {
                plan,
                seed,
                config: CoordinatorConfig::default(),
                timeout: None,
                latency: None,
                fail_compensation,
            }
        }
        Ok(CliAction::Run(opts)) => opts,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    };

    let report = execute(opts).await;
    println!("{}", format_report(&report, output_mode));
    process::exit(report.result.exit_code());
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "redtxn=debug" } else { "redtxn=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn execute(opts: RunOptions) -> Report {
    let store = Arc::new(seeded_store(&opts.seed, opts.latency));
    if opts.fail_compensation {
        // Submission 0 is the main batch; 1 is its compensation.
        store.fail_submission(1, Fault::DropRequest);
    }

    let client: Arc<dyn StoreClient> = match opts.timeout {
        Some(timeout) => Arc::new(TimeoutClient::new(Arc::clone(&store), timeout)),
        None => Arc::clone(&store) as Arc<dyn StoreClient>,
    };

    let coordinator = TransactionCoordinator::with_config(client, opts.config);
    info!(steps = opts.plan.len(), "Executing plan");
    let result = coordinator.execute_atomic(&opts.plan).await;
    debug!(metrics = %format_metrics(&coordinator.metrics()), "Run finished");

    report(opts.plan, RunResult::from_result(result), &store)
}

fn seeded_store(seed: &BTreeMap<String, Value>, latency: Option<Duration>) -> MemoryStore {
    let mut store = MemoryStore::new();
    if let Some(latency) = latency {
        store = store.with_latency(latency);
    }
    for (key, value) in seed {
        store.set(key.clone(), value.clone());
    }
    store
}

fn report(plan: TransactionPlan, result: RunResult, store: &MemoryStore) -> Report {
    Report {
        plan,
        result,
        round_trips: store.submission_count(),
        state: store.snapshot(),
    }
}
