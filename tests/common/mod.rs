//! Shared helpers for integration tests.

#![allow(dead_code)]

pub use std::sync::Arc;

pub use redtxn::prelude::*;
pub use redtxn::{CommandFailure, Fault, TimeoutClient, TransportError};

/// A store and a coordinator sharing it.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub coordinator: TransactionCoordinator<Arc<MemoryStore>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let coordinator = TransactionCoordinator::with_config(Arc::clone(&store), config);
        Harness { store, coordinator }
    }

    /// Seed `a=1, b="123e", c=1`.
    pub fn abc(self) -> Self {
        self.store.set("a", 1);
        self.store.set("b", "123e");
        self.store.set("c", 1);
        self
    }

    pub async fn run(&self, plan: &TransactionPlan) -> TransactionOutcome {
        self.coordinator
            .execute_atomic(plan)
            .await
            .expect("transaction should reach the store")
    }
}

/// `[INCR a, INCR b, INCR c]` undone by `[DECR a, DECR b, DECR c]`.
pub fn incr_abc() -> TransactionPlan {
    counters(&["a", "b", "c"])
}

/// One `INCR key` / `DECR key` step per key.
pub fn counters(keys: &[&str]) -> TransactionPlan {
    keys.iter()
        .fold(TransactionPlan::builder(), |b, k| {
            b.step(Instruction::incr(*k), Instruction::decr(*k))
        })
        .build()
}

/// Install a log subscriber once so failing tests show coordinator logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("redtxn=debug")
        .try_init();
}

pub fn failed_indices(outcome: &TransactionOutcome) -> Vec<usize> {
    outcome.failures().iter().map(|f| f.index).collect()
}
