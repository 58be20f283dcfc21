//! Transaction coordinator
//!
//! Drives one transaction through at most two round trips:
//!
//! ```text
//! Idle --main batch--> MainSubmitted
//! MainSubmitted --all succeeded-----------> Committed
//! MainSubmitted --transport failure-------> Err(Connection)
//! MainSubmitted --some index failed-------> CompensationSubmitted
//! CompensationSubmitted --replies---------> RolledBack
//! CompensationSubmitted --transport fail--> CompensationFailed
//! ```
//!
//! The main batch and the compensation batch are two independent atomic
//! batches. Another client may observe or modify the store between them;
//! that window is inherent to compensation and is not closed here.
//!
//! The coordinator never retries and never reads the store back. Which
//! commands to undo is decided from the main batch's replies alone.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, info, info_span, Instrument};

use redtxn_client::StoreClient;
use redtxn_core::{Error, Result, TransactionPlan};

use crate::classify::{classify, failures};
use crate::compensation::CompensationPlanner;
use crate::config::CoordinatorConfig;
use crate::executor::BatchExecutor;
use crate::metrics::{CoordinatorMetrics, Counters};
use crate::outcome::TransactionOutcome;

/// Executes [`TransactionPlan`]s with logical atomicity.
///
/// One coordinator may serve any number of concurrent transactions; it
/// holds no per-transaction state and never locks. Each call gets its own
/// transaction id for log correlation.
pub struct TransactionCoordinator<C> {
    executor: BatchExecutor<C>,
    config: CoordinatorConfig,
    /// Next transaction id, starting at 1
    next_txn_id: AtomicU64,
    counters: Counters,
}

impl<C: StoreClient> TransactionCoordinator<C> {
    /// Create a coordinator with the default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, CoordinatorConfig::default())
    }

    /// Create a coordinator with an explicit configuration.
    pub fn with_config(client: C, config: CoordinatorConfig) -> Self {
        let executor = BatchExecutor::new(client).with_empty_elision(config.elide_empty_batches);
        TransactionCoordinator {
            executor,
            config,
            next_txn_id: AtomicU64::new(1),
            counters: Counters::default(),
        }
    }

    /// The executor every batch goes through
    pub fn executor(&self) -> &BatchExecutor<C> {
        &self.executor
    }

    /// Active configuration
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Snapshot of outcome counters.
    pub fn metrics(&self) -> CoordinatorMetrics {
        self.counters.snapshot()
    }

    /// Execute `plan` so that either every main command takes effect, or
    /// every main command that did take effect is undone.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the plan exceeds `max_batch_len`. Nothing
    ///   is sent.
    /// - [`Error::Connection`] if the main batch is lost on the transport.
    ///   The store's state is unknown and nothing is compensated.
    ///
    /// Command failures are not errors here; they produce a
    /// [`TransactionOutcome::RolledBack`] or
    /// [`TransactionOutcome::CompensationFailed`]. Use
    /// [`TransactionOutcome::into_result`] to fold them into [`Error`].
    pub async fn execute_atomic(&self, plan: &TransactionPlan) -> Result<TransactionOutcome> {
        self.config.check_plan_len(plan.len())?;

        let txn_id = self.next_txn_id.fetch_add(1, Ordering::SeqCst);
        let span = info_span!("transaction", txn_id, steps = plan.len());

        self.run(plan).instrument(span).await
    }

    async fn run(&self, plan: &TransactionPlan) -> Result<TransactionOutcome> {
        let replies = match self.executor.execute_batch(plan.main()).await {
            Ok(replies) => replies,
            Err(e) => {
                self.counters.record_connection_failure();
                error!(error = %e, "Main batch lost, store state unknown");
                return Err(Error::Connection(e));
            }
        };

        let failed = classify(&replies);
        if failed.is_empty() {
            debug!(batch_len = replies.len(), "Transaction committed");
            let outcome = TransactionOutcome::Committed { replies };
            self.counters.record(&outcome);
            return Ok(outcome);
        }

        let failures = failures(&replies);
        info!(
            failed = ?failed.iter().collect::<Vec<_>>(),
            batch_len = replies.len(),
            "Main batch partially failed, compensating"
        );

        let planner = CompensationPlanner::new(&self.executor);
        let outcome = match planner.plan_and_submit(plan.rollback(), &failed).await {
            Ok(compensation) => {
                let compensation_errors = compensation.errors();
                if compensation_errors.is_empty() {
                    info!(
                        compensated = compensation.replies.len(),
                        "Transaction rolled back"
                    );
                } else {
                    error!(
                        compensated = compensation.replies.len(),
                        not_undone = ?compensation_errors.iter().map(|f| f.index).collect::<Vec<_>>(),
                        errors = %compensation_errors
                            .iter()
                            .map(|f| f.to_string())
                            .collect::<Vec<_>>()
                            .join("; "),
                        "Store rejected compensating commands, state not restored"
                    );
                }
                TransactionOutcome::RolledBack {
                    failures,
                    compensation_errors,
                }
            }
            Err(e) => {
                error!(
                    error = %e,
                    failed = ?failed.iter().collect::<Vec<_>>(),
                    "Compensation batch lost, succeeded commands may remain applied; manual reconciliation required"
                );
                TransactionOutcome::CompensationFailed { failures, error: e }
            }
        };

        self.counters.record(&outcome);
        Ok(outcome)
    }
}
