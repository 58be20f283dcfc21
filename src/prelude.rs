//! Convenient imports for redtxn.
//!
//! ```
//! use redtxn::prelude::*;
//!
//! let plan = TransactionPlan::new(vec![Instruction::incr("a")], vec![Instruction::decr("a")]);
//! assert!(plan.is_ok());
//! ```

// Coordinator
pub use crate::{CoordinatorConfig, TransactionCoordinator, TransactionOutcome};

// Error handling
pub use crate::{Error, Result};

// Model
pub use crate::{Instruction, Reply, TransactionPlan, Value};

// Store access
pub use crate::{MemoryStore, StoreClient};
