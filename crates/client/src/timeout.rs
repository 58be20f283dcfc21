//! Per-round-trip timeout policy.
//!
//! Timeouts are a property of the client, not of the coordinator. Wrapping a
//! client in [`TimeoutClient`] turns a slow round trip into
//! [`TransportError::Timeout`], which the coordinator then treats like any
//! other transport failure: a `ConnectionError` on the main batch, a
//! `CompensationFailed` on the compensation batch.

use std::time::Duration;

use async_trait::async_trait;
use redtxn_core::{Instruction, Reply, TransportError};
use tracing::warn;

use crate::StoreClient;

/// A [`StoreClient`] that bounds every round trip.
#[derive(Debug, Clone)]
pub struct TimeoutClient<C> {
    inner: C,
    timeout: Duration,
}

impl<C> TimeoutClient<C> {
    /// Wrap `inner`, failing any round trip that takes longer than `timeout`.
    pub fn new(inner: C, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: StoreClient> StoreClient for TimeoutClient<C> {
    async fn submit_batch(&self, batch: &[Instruction]) -> Result<Vec<Reply>, TransportError> {
        match tokio::time::timeout(self.timeout, self.inner.submit_batch(batch)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    batch_len = batch.len(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Round trip timed out; batch outcome unknown"
                );
                Err(TransportError::Timeout(self.timeout))
            }
        }
    }
}
