//! Store client interface for redtxn
//!
//! The coordinator never talks to a store directly. It submits ordered
//! batches through a [`StoreClient`], which promises queue-level atomicity:
//! no other batch's commands run between the commands of one batch. It does
//! not promise that every command succeeds; a rejected command yields an
//! error [`Reply`] at its index while its neighbours still apply.
//!
//! This crate provides:
//! - [`StoreClient`]: the async batch submission trait
//! - [`MemoryStore`]: an in-process store with Redis-style command semantics
//! - [`FaultPlan`]: scripted transport failures for a [`MemoryStore`]
//! - [`TimeoutClient`]: a per-round-trip timeout policy around any client
//!
//! Connection lifecycle (connect, auth, reconnect, shutdown) belongs to the
//! application that owns the client, not to this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fault;
pub mod memory;
pub mod timeout;

use std::sync::Arc;

use async_trait::async_trait;
use redtxn_core::{Instruction, Reply};

pub use fault::{Fault, FaultPlan};
pub use memory::MemoryStore;
pub use redtxn_core::TransportError;
pub use timeout::TimeoutClient;

/// A store that executes ordered batches with queue-level atomicity.
///
/// Every call is a suspension point; implementations must not block the
/// calling thread while waiting for the store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Submit `batch` as one atomic batch.
    ///
    /// On success, returns exactly one reply per instruction, in submission
    /// order. On transport failure nothing is known about which commands
    /// ran, and no replies are returned.
    async fn submit_batch(&self, batch: &[Instruction]) -> Result<Vec<Reply>, TransportError>;
}

#[async_trait]
impl<C: StoreClient + ?Sized> StoreClient for Arc<C> {
    async fn submit_batch(&self, batch: &[Instruction]) -> Result<Vec<Reply>, TransportError> {
        (**self).submit_batch(batch).await
    }
}

