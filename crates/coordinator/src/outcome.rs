//! Terminal transaction outcomes.

use serde::Serialize;

use redtxn_core::{CommandFailure, Error, Reply, Result, TransportError};

/// How a transaction that reached the store ended.
///
/// Validation and main-batch connection failures never produce an outcome;
/// they are returned as [`Error`] before or instead of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransactionOutcome {
    /// Every main command succeeded
    Committed {
        /// Main-batch replies in plan order
        replies: Vec<Reply>,
    },

    /// Some main commands failed and the compensation batch was applied.
    /// The store is restored only if `compensation_errors` is empty.
    RolledBack {
        /// Failed main commands
        failures: Vec<CommandFailure>,
        /// Compensating commands the store rejected, keyed by main index
        #[serde(skip_serializing_if = "Vec::is_empty")]
        compensation_errors: Vec<CommandFailure>,
    },

    /// The compensation batch was lost on the transport. Succeeded main
    /// commands may remain applied.
    CompensationFailed {
        /// Failed main commands
        failures: Vec<CommandFailure>,
        /// Transport failure of the compensation batch
        #[serde(serialize_with = "display")]
        error: TransportError,
    },
}

impl TransactionOutcome {
    /// Check if the transaction committed
    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionOutcome::Committed { .. })
    }

    /// Check if the transaction was rolled back
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, TransactionOutcome::RolledBack { .. })
    }

    /// Check if the store is known to hold exactly what it held before.
    ///
    /// True for a commit, and for a rollback whose every compensating command
    /// applied.
    pub fn is_restored(&self) -> bool {
        match self {
            TransactionOutcome::Committed { .. } => true,
            TransactionOutcome::RolledBack {
                compensation_errors,
                ..
            } => compensation_errors.is_empty(),
            TransactionOutcome::CompensationFailed { .. } => false,
        }
    }

    /// Failed main commands; empty for a commit.
    pub fn failures(&self) -> &[CommandFailure] {
        match self {
            TransactionOutcome::Committed { .. } => &[],
            TransactionOutcome::RolledBack { failures, .. }
            | TransactionOutcome::CompensationFailed { failures, .. } => failures,
        }
    }

    /// Short label for logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            TransactionOutcome::Committed { .. } => "committed",
            TransactionOutcome::RolledBack { .. } => "rolled_back",
            TransactionOutcome::CompensationFailed { .. } => "compensation_failed",
        }
    }

    /// Replies on commit, otherwise the matching [`Error`].
    pub fn into_result(self) -> Result<Vec<Reply>> {
        match self {
            TransactionOutcome::Committed { replies } => Ok(replies),
            TransactionOutcome::RolledBack {
                failures,
                compensation_errors,
            } => Err(Error::RolledBack {
                failures,
                compensation_errors,
            }),
            TransactionOutcome::CompensationFailed { failures, error } => {
                Err(Error::CompensationFailed {
                    failures,
                    source: error,
                })
            }
        }
    }
}

fn display<S: serde::Serializer>(
    err: &TransportError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}
