//! Coordinator Integration Tests
//!
//! End-to-end transactions against the in-memory store: commit, rollback,
//! transport faults, validation and concurrent use of one coordinator.

#[path = "../common/mod.rs"]
mod common;

mod commit;
mod concurrency;
mod faults;
mod properties;
mod rollback;
mod validation;
