//! Core types for redtxn
//!
//! This crate defines the data model shared by every other crate:
//! - [`Value`]: arguments and reply payloads
//! - [`Command`] / [`Instruction`]: validated store commands
//! - [`Reply`] / [`CommandError`]: per-index batch results
//! - [`TransactionPlan`]: index-aligned main and rollback sequences
//! - [`Error`]: the error taxonomy surfaced to callers
//!
//! Everything here is pure data. Nothing in this crate talks to a store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod error;
pub mod instruction;
pub mod plan;
pub mod reply;
pub mod value;

pub use command::{ArgKind, Command};
pub use error::{Error, Result, TransportError};
pub use instruction::Instruction;
pub use plan::{PlanBuilder, TransactionPlan};
pub use reply::{CommandError, CommandFailure, ErrorKind, Reply};
pub use value::Value;
