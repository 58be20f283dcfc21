//! Transaction plans.
//!
//! A [`TransactionPlan`] pairs every main instruction with the instruction
//! that undoes it. The two sequences are index-aligned: `rollback[i]` is
//! the caller's claim of the inverse of `main[i]`, assuming `main[i]` was
//! applied. Alignment is enforced here; semantic inversion is not, since
//! no check can tell a wrong inverse from a right one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instruction::Instruction;

/// Index-aligned main and rollback instruction sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlan")]
pub struct TransactionPlan {
    main: Vec<Instruction>,
    rollback: Vec<Instruction>,
}

impl TransactionPlan {
    /// Create a plan, rejecting sequences of different lengths.
    pub fn new(main: Vec<Instruction>, rollback: Vec<Instruction>) -> Result<Self> {
        if main.len() != rollback.len() {
            return Err(Error::validation(format!(
                "plan has {} main instruction(s) but {} rollback instruction(s)",
                main.len(),
                rollback.len()
            )));
        }
        Ok(Self { main, rollback })
    }

    /// An empty plan; commits trivially.
    pub fn empty() -> Self {
        Self {
            main: Vec::new(),
            rollback: Vec::new(),
        }
    }

    /// Start building a plan step by step.
    pub fn builder() -> PlanBuilder {
        PlanBuilder::default()
    }

    /// Main instructions, in submission order
    pub fn main(&self) -> &[Instruction] {
        &self.main
    }

    /// Rollback instructions, aligned with [`main`](Self::main)
    pub fn rollback(&self) -> &[Instruction] {
        &self.rollback
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Check if the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Iterate over `(main, rollback)` pairs
    pub fn steps(&self) -> impl Iterator<Item = (&Instruction, &Instruction)> {
        self.main.iter().zip(self.rollback.iter())
    }
}

/// Builds a [`TransactionPlan`] one aligned step at a time.
///
/// # Example
///
/// ```
/// use redtxn_core::{Instruction, TransactionPlan};
///
/// let plan = TransactionPlan::builder()
///     .step(Instruction::set("flag", "on"), Instruction::set("flag", "off"))
///     .reversible(Instruction::incr("counter"))?
///     .build();
///
/// assert_eq!(plan.rollback()[1], Instruction::decr("counter"));
/// # Ok::<(), redtxn_core::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct PlanBuilder {
    main: Vec<Instruction>,
    rollback: Vec<Instruction>,
}

impl PlanBuilder {
    /// Add a main instruction with its explicit rollback.
    pub fn step(mut self, main: Instruction, rollback: Instruction) -> Self {
        self.main.push(main);
        self.rollback.push(rollback);
        self
    }

    /// Add a main instruction rolled back by its natural inverse.
    ///
    /// Fails with a validation error if the command has none.
    pub fn reversible(self, main: Instruction) -> Result<Self> {
        let rollback = main.inverse().ok_or_else(|| {
            Error::validation(format!("{} has no natural inverse", main.command()))
        })?;
        Ok(self.step(main, rollback))
    }

    /// Finish the plan. Alignment holds by construction.
    pub fn build(self) -> TransactionPlan {
        TransactionPlan {
            main: self.main,
            rollback: self.rollback,
        }
    }
}

#[derive(Deserialize)]
struct RawPlan {
    main: Vec<Instruction>,
    rollback: Vec<Instruction>,
}

impl TryFrom<RawPlan> for TransactionPlan {
    type Error = Error;

    fn try_from(raw: RawPlan) -> Result<Self> {
        TransactionPlan::new(raw.main, raw.rollback)
    }
}
