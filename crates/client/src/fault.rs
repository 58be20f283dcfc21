//! Scripted transport failures.
//!
//! A [`FaultPlan`] maps submission ordinals (0 for the first batch a store
//! receives, 1 for the second, ...) to a [`Fault`]. The store consults it
//! on every submission, so a test can say "let the main batch through, then
//! drop the compensation batch" without any timing tricks.

use parking_lot::Mutex;
use std::collections::BTreeMap;

use redtxn_core::TransportError;

/// How a submission fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Connection lost before the store saw the batch. Nothing applies.
    DropRequest,
    /// Batch applied, then the connection was lost before the replies
    /// arrived. The caller cannot tell this apart from `DropRequest`.
    DropResponse,
}

impl Fault {
    /// Whether the batch reaches the store before the failure.
    pub fn applies_batch(&self) -> bool {
        matches!(self, Fault::DropResponse)
    }

    /// The error the caller observes.
    pub fn to_transport_error(&self, ordinal: u64) -> TransportError {
        match self {
            Fault::DropRequest => {
                TransportError::Closed(format!("connection reset before batch #{}", ordinal))
            }
            Fault::DropResponse => TransportError::Closed(format!(
                "connection reset while awaiting replies to batch #{}",
                ordinal
            )),
        }
    }
}

/// Faults keyed by submission ordinal.
#[derive(Debug, Default)]
pub struct FaultPlan {
    scheduled: Mutex<BTreeMap<u64, Fault>>,
}

impl FaultPlan {
    /// An empty plan: every submission succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`schedule`](Self::schedule)
    pub fn at(self, ordinal: u64, fault: Fault) -> Self {
        self.schedule(ordinal, fault);
        self
    }

    /// Fail the submission with the given ordinal
    pub fn schedule(&self, ordinal: u64, fault: Fault) {
        self.scheduled.lock().insert(ordinal, fault);
    }

    /// Remove all pending faults
    pub fn clear(&self) {
        self.scheduled.lock().clear();
    }

    /// Number of faults not yet triggered
    pub fn pending(&self) -> usize {
        self.scheduled.lock().len()
    }

    /// Consume the fault for `ordinal`, if one is scheduled.
    pub(crate) fn take(&self, ordinal: u64) -> Option<Fault> {
        self.scheduled.lock().remove(&ordinal)
    }
}
