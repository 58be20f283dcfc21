//! Compensating-transaction coordinator for redtxn
//!
//! A store that executes batches with queue-level atomicity still lets
//! individual commands fail while their neighbours apply. This crate adds
//! logical atomicity on top: run the main batch, and if any command was
//! rejected, submit a second batch undoing exactly the commands that
//! succeeded.
//!
//! - [`BatchExecutor`]: one instruction sequence in, one reply sequence out
//! - [`classify`]: which indices of a reply sequence failed
//! - [`CompensationPlanner`]: which rollback instructions to send
//! - [`TransactionCoordinator`]: the state machine tying them together
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use redtxn_client::MemoryStore;
//! use redtxn_coordinator::{TransactionCoordinator, TransactionOutcome};
//! use redtxn_core::{Instruction, TransactionPlan};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(MemoryStore::new());
//! store.set("b", "123e");
//!
//! let plan = TransactionPlan::new(
//!     vec![Instruction::incr("a"), Instruction::incr("b")],
//!     vec![Instruction::decr("a"), Instruction::decr("b")],
//! )
//! .unwrap();
//!
//! let coordinator = TransactionCoordinator::new(Arc::clone(&store));
//! let outcome = coordinator.execute_atomic(&plan).await.unwrap();
//!
//! assert!(matches!(outcome, TransactionOutcome::RolledBack { .. }));
//! assert_eq!(store.get_int("a"), Some(0));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod compensation;
pub mod config;
pub mod coordinator;
pub mod executor;
pub mod metrics;
pub mod outcome;

pub use classify::{classify, failures, partition, FailedIndices};
pub use compensation::{CompensationBatch, CompensationPlanner, CompensationReplies};
pub use config::CoordinatorConfig;
pub use coordinator::TransactionCoordinator;
pub use executor::BatchExecutor;
pub use metrics::CoordinatorMetrics;
pub use outcome::TransactionOutcome;
