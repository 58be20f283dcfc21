//! # redtxn
//!
//! Logical atomicity for stores that only offer queue-level atomic batches.
//!
//! A batch submitted to such a store runs without interleaving, but a
//! rejected command does not stop its neighbours from applying. redtxn
//! pairs every command with its inverse and, when anything in the main
//! batch fails, submits a second batch that undoes exactly the commands
//! that succeeded.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use redtxn::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(MemoryStore::new());
//! store.set("a", 1);
//! store.set("b", "123e");
//!
//! let plan = TransactionPlan::builder()
//!     .reversible(Instruction::incr("a"))?
//!     .reversible(Instruction::incr("b"))?
//!     .build();
//!
//! let coordinator = TransactionCoordinator::new(Arc::clone(&store));
//! match coordinator.execute_atomic(&plan).await? {
//!     TransactionOutcome::RolledBack { failures, .. } => assert_eq!(failures[0].index, 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert_eq!(store.get_int("a"), Some(1));
//! # Ok::<(), redtxn::Error>(())
//! # }).unwrap();
//! ```
//!
//! ## Crates
//!
//! - `redtxn-core`: instructions, plans, replies and the error taxonomy
//! - `redtxn-client`: the [`StoreClient`] trait and an in-memory store
//! - `redtxn-coordinator`: batch execution, classification and compensation

#![warn(missing_docs)]

pub mod prelude;

// Entry points
pub use redtxn_coordinator::{
    BatchExecutor, CoordinatorConfig, CoordinatorMetrics, TransactionCoordinator, TransactionOutcome,
};

// Error handling
pub use redtxn_core::{Error, Result, TransportError};

// Model
pub use redtxn_core::{
    Command, CommandError, CommandFailure, Instruction, PlanBuilder, Reply, TransactionPlan, Value,
};

// Store access
pub use redtxn_client::{Fault, FaultPlan, MemoryStore, StoreClient, TimeoutClient};
