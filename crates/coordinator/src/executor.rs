//! Batch execution.
//!
//! [`BatchExecutor`] submits one instruction sequence as one atomic batch and
//! normalizes the result into either an ordered reply sequence or a
//! transport failure. It never returns a partial reply sequence: if the
//! replies cannot be matched one-to-one with the instructions, the batch's
//! effect is unknown and that is reported as a transport failure.

use redtxn_client::StoreClient;
use redtxn_core::{Instruction, Reply, TransportError};
use tracing::{debug, warn};

/// Submits instruction sequences through a [`StoreClient`].
#[derive(Debug, Clone)]
pub struct BatchExecutor<C> {
    client: C,
    elide_empty: bool,
}

impl<C: StoreClient> BatchExecutor<C> {
    /// Create an executor that skips the round trip for empty batches.
    pub fn new(client: C) -> Self {
        Self {
            client,
            elide_empty: true,
        }
    }

    /// Choose whether empty batches are sent to the store.
    ///
    /// Either way an empty batch yields an empty reply sequence.
    pub fn with_empty_elision(mut self, elide_empty: bool) -> Self {
        self.elide_empty = elide_empty;
        self
    }

    /// The underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit `instructions` as a single atomic batch.
    ///
    /// Per-command errors come back as [`Reply::Error`] at their index.
    /// Only a failure of the round trip itself is an `Err`.
    pub async fn execute_batch(
        &self,
        instructions: &[Instruction],
    ) -> Result<Vec<Reply>, TransportError> {
        if instructions.is_empty() && self.elide_empty {
            debug!("Empty batch, skipping round trip");
            return Ok(Vec::new());
        }

        let replies = self.client.submit_batch(instructions).await?;

        if replies.len() != instructions.len() {
            warn!(
                sent = instructions.len(),
                received = replies.len(),
                "Reply count does not match batch length"
            );
            return Err(TransportError::Protocol(format!(
                "sent {} command(s), received {} reply(ies)",
                instructions.len(),
                replies.len()
            )));
        }

        Ok(replies)
    }
}
