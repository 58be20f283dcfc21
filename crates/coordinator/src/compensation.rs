//! Compensation planning.
//!
//! The compensation batch for a main batch is `rollback[i]` for every index
//! `i` whose main command succeeded, in ascending index order. Failed
//! commands changed nothing and are never compensated. The selection is made
//! from the main batch's replies alone; no read-back of the store happens.

use redtxn_client::StoreClient;
use redtxn_core::{CommandFailure, Instruction, Reply, TransportError};
use tracing::debug;

use crate::classify::FailedIndices;
use crate::executor::BatchExecutor;

/// Instructions selected for compensation, with the main-batch index each
/// one undoes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompensationBatch {
    /// Main-batch index of each selected rollback instruction
    pub indices: Vec<usize>,
    /// Rollback instructions in submission order
    pub instructions: Vec<Instruction>,
}

impl CompensationBatch {
    /// Number of compensating instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when nothing needs undoing
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Replies to a submitted compensation batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompensationReplies {
    /// Main-batch index each reply belongs to
    pub indices: Vec<usize>,
    /// Replies in submission order
    pub replies: Vec<Reply>,
}

impl CompensationReplies {
    /// Compensating commands the store rejected, keyed by main-batch index.
    pub fn errors(&self) -> Vec<CommandFailure> {
        self.indices
            .iter()
            .zip(&self.replies)
            .filter_map(|(&index, reply)| {
                reply.error().map(|e| CommandFailure {
                    index,
                    error: e.clone(),
                })
            })
            .collect()
    }
}

/// Select the rollback instructions for every index not in `failed`.
///
/// `rollback` is the plan's rollback sequence; it is always the same length
/// as the main batch the failures were classified from.
pub fn plan(rollback: &[Instruction], failed: &FailedIndices) -> CompensationBatch {
    let mut batch = CompensationBatch::default();
    for (i, instr) in rollback.iter().enumerate() {
        if !failed.contains(i) {
            batch.indices.push(i);
            batch.instructions.push(instr.clone());
        }
    }
    batch
}

/// Builds and submits compensation batches through a borrowed executor.
pub struct CompensationPlanner<'e, C> {
    executor: &'e BatchExecutor<C>,
}

impl<'e, C: StoreClient> CompensationPlanner<'e, C> {
    /// Plan against `executor`
    pub fn new(executor: &'e BatchExecutor<C>) -> Self {
        Self { executor }
    }

    /// Select and submit the compensation batch as one atomic batch.
    ///
    /// An empty selection (every main command failed) is still routed
    /// through the executor, which decides whether it costs a round trip.
    pub async fn plan_and_submit(
        &self,
        rollback: &[Instruction],
        failed: &FailedIndices,
    ) -> Result<CompensationReplies, TransportError> {
        let batch = plan(rollback, failed);
        debug!(
            compensating = batch.len(),
            skipped = failed.len(),
            "Submitting compensation batch"
        );

        let replies = self.executor.execute_batch(&batch.instructions).await?;
        Ok(CompensationReplies {
            indices: batch.indices,
            replies,
        })
    }
}
