//! Outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::outcome::TransactionOutcome;

/// Live counters, shared by every invocation on one coordinator.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    committed: AtomicU64,
    rolled_back: AtomicU64,
    connection_failures: AtomicU64,
    compensation_failures: AtomicU64,
}

impl Counters {
    pub(crate) fn record(&self, outcome: &TransactionOutcome) {
        let counter = match outcome {
            TransactionOutcome::Committed { .. } => &self.committed,
            TransactionOutcome::RolledBack { .. } => &self.rolled_back,
            TransactionOutcome::CompensationFailed { .. } => &self.compensation_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_connection_failure(&self) {
        self.connection_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CoordinatorMetrics {
        let committed = self.committed.load(Ordering::Relaxed);
        let rolled_back = self.rolled_back.load(Ordering::Relaxed);
        let connection_failures = self.connection_failures.load(Ordering::Relaxed);
        let compensation_failures = self.compensation_failures.load(Ordering::Relaxed);

        let total = committed + rolled_back + connection_failures + compensation_failures;
        let commit_rate = if total == 0 {
            0.0
        } else {
            committed as f64 / total as f64
        };

        CoordinatorMetrics {
            committed,
            rolled_back,
            connection_failures,
            compensation_failures,
            commit_rate,
        }
    }
}

/// Coordinator metrics.
///
/// Validation failures are not counted: nothing was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorMetrics {
    /// Transactions whose every command succeeded
    pub committed: u64,
    /// Transactions undone by a completed compensation batch
    pub rolled_back: u64,
    /// Main batches lost on the transport
    pub connection_failures: u64,
    /// Compensation batches lost on the transport
    pub compensation_failures: u64,
    /// Commit success rate (0.0 - 1.0)
    pub commit_rate: f64,
}

impl CoordinatorMetrics {
    /// Transactions that reached the store
    pub fn total(&self) -> u64 {
        self.committed + self.rolled_back + self.connection_failures + self.compensation_failures
    }
}
