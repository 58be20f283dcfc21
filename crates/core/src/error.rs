//! Unified error types for redtxn.
//!
//! Two layers of failure exist and must never be confused:
//!
//! - [`TransportError`]: the batch could not be submitted or its replies were
//!   lost. The store's state after such a failure is unknown.
//! - [`CommandError`](crate::CommandError): a single command inside a batch
//!   was rejected by the store. Its neighbours still applied.
//!
//! [`Error`] is the taxonomy surfaced to callers of the coordinator.
//!
//! | Variant | Fatal | Store state |
//! |---------|-------|-------------|
//! | `Validation` | no | untouched, nothing was sent |
//! | `Config` | no | untouched, nothing was sent |
//! | `Connection` | yes | unknown |
//! | `RolledBack` | no | restored |
//! | `RolledBack` with compensation errors | yes | partially restored |
//! | `CompensationFailed` | yes | partially applied |

use std::time::Duration;
use thiserror::Error;

use crate::reply::CommandFailure;

/// Transport-level failure of a whole round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection dropped before the batch completed
    #[error("connection closed: {0}")]
    Closed(String),

    /// Round trip exceeded the client's timeout
    #[error("round trip timed out after {0:?}")]
    Timeout(Duration),

    /// Store answered with something that cannot be matched to the batch
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Io(e.to_string())
    }
}

/// All redtxn errors.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed instruction or plan; raised before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Unreadable or inconsistent configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure on the main batch; outcome unknown, nothing compensated
    #[error("connection error: {0}")]
    Connection(#[from] TransportError),

    /// One or more commands failed and the compensation batch was applied
    ///
    /// If the store rejected any compensating command, `compensation_errors`
    /// names the main-batch indices that were not undone.
    #[error(
        "transaction rolled back: {} command(s) failed ({}){}",
        .failures.len(),
        summarize(.failures),
        unrestored(.compensation_errors)
    )]
    RolledBack {
        /// Failed indices of the main batch with their errors
        failures: Vec<CommandFailure>,
        /// Compensating commands the store rejected, keyed by main index
        compensation_errors: Vec<CommandFailure>,
    },

    /// The compensation batch itself hit a transport failure (double fault)
    #[error(
        "compensation failed after {} command(s) failed ({}): {}",
        .failures.len(),
        summarize(.failures),
        .source
    )]
    CompensationFailed {
        /// Failed indices of the main batch with their errors
        failures: Vec<CommandFailure>,
        /// Transport failure of the compensation batch
        source: TransportError,
    },
}

/// Result type for redtxn operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation(reason.into())
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the store may be left in an unknown or inconsistent state.
    ///
    /// Fatal errors cannot be recovered by the coordinator and need
    /// reconciliation by the caller.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Connection(_) | Error::CompensationFailed { .. } => true,
            Error::RolledBack {
                compensation_errors,
                ..
            } => !compensation_errors.is_empty(),
            _ => false,
        }
    }

    /// Check if the whole transaction may be submitted again as-is.
    ///
    /// Only a rollback whose every compensating command applied leaves the
    /// store in its known prior state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::RolledBack { compensation_errors, .. } if compensation_errors.is_empty()
        )
    }

    /// Failed commands of the main batch, if any were observed.
    pub fn failures(&self) -> &[CommandFailure] {
        match self {
            Error::RolledBack { failures, .. } | Error::CompensationFailed { failures, .. } => {
                failures
            }
            _ => &[],
        }
    }
}

fn unrestored(errors: &[CommandFailure]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(", {} not undone ({})", errors.len(), summarize(errors))
    }
}

fn summarize(failures: &[CommandFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
