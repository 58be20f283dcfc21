//! Instruction model.
//!
//! An [`Instruction`] is a validated, immutable pairing of a [`Command`] and
//! its arguments. Validation happens in the constructor, so an instruction
//! that exists is always well-formed and can be submitted without further
//! checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::command::{ArgKind, Command};
use crate::error::{Error, Result};
use crate::value::Value;

/// A single store command with its arguments.
///
/// # Example
///
/// ```
/// use redtxn_core::{Command, Instruction, Value};
///
/// let incr = Instruction::new(Command::Incr, vec![Value::from("a")])?;
/// assert_eq!(incr, Instruction::incr("a"));
///
/// // Wrong arity never reaches the store
/// assert!(Instruction::new(Command::Incr, vec![]).is_err());
/// # Ok::<(), redtxn_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction", into = "RawInstruction")]
pub struct Instruction {
    command: Command,
    args: Vec<Value>,
}

impl Instruction {
    /// Create an instruction, checking arity and argument types.
    pub fn new(command: Command, args: Vec<Value>) -> Result<Self> {
        let signature = command.signature();
        if args.len() != signature.len() {
            return Err(Error::validation(format!(
                "{} expects {} argument(s), got {}",
                command,
                signature.len(),
                args.len()
            )));
        }

        for (pos, (kind, arg)) in signature.iter().zip(&args).enumerate() {
            let ok = match kind {
                ArgKind::Key => arg.as_str().is_some(),
                ArgKind::Int => arg.as_int().is_some(),
                ArgKind::Scalar => arg.is_scalar(),
            };
            if !ok {
                return Err(Error::validation(format!(
                    "{} argument {} must be of type {}, got {}",
                    command,
                    pos,
                    kind.name(),
                    arg.type_name()
                )));
            }
        }

        Ok(Self { command, args })
    }

    /// Create an instruction from a command name.
    ///
    /// Unknown names fail with a validation error.
    pub fn parse(name: &str, args: Vec<Value>) -> Result<Self> {
        Self::new(name.parse()?, args)
    }

    /// The command
    pub fn command(&self) -> Command {
        self.command
    }

    /// The arguments, in order
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The key this instruction targets.
    ///
    /// Every supported command takes its key first.
    pub fn key(&self) -> &str {
        self.args.first().and_then(Value::as_str).unwrap_or_default()
    }

    /// The natural inverse of this instruction, assuming it was applied.
    ///
    /// Only counter arithmetic and `RPUSH` have an inverse that does not
    /// depend on the prior value. Everything else returns `None` and needs a
    /// caller-supplied rollback.
    pub fn inverse(&self) -> Option<Instruction> {
        let key = self.key().to_string();
        match self.command {
            Command::Incr => Some(Instruction::decr(key)),
            Command::Decr => Some(Instruction::incr(key)),
            Command::IncrBy => self.args[1].as_int().map(|n| Instruction::decr_by(key, n)),
            Command::DecrBy => self.args[1].as_int().map(|n| Instruction::incr_by(key, n)),
            Command::RPush => Some(Instruction::rpop(key)),
            _ => None,
        }
    }

    // =========================================================================
    // Typed constructors
    // =========================================================================

    fn keyed(command: Command, key: impl Into<String>, rest: Option<Value>) -> Self {
        let mut args = vec![Value::String(key.into())];
        args.extend(rest);
        Self { command, args }
    }

    /// GET key
    pub fn get(key: impl Into<String>) -> Self {
        Self::keyed(Command::Get, key, None)
    }

    /// SET key value
    ///
    /// A `Null` value is stored as the empty string.
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = match value.into() {
            Value::Null => Value::String(String::new()),
            v => v,
        };
        Self::keyed(Command::Set, key, Some(value))
    }

    /// DEL key
    pub fn del(key: impl Into<String>) -> Self {
        Self::keyed(Command::Del, key, None)
    }

    /// EXISTS key
    pub fn exists(key: impl Into<String>) -> Self {
        Self::keyed(Command::Exists, key, None)
    }

    /// INCR key
    pub fn incr(key: impl Into<String>) -> Self {
        Self::keyed(Command::Incr, key, None)
    }

    /// DECR key
    pub fn decr(key: impl Into<String>) -> Self {
        Self::keyed(Command::Decr, key, None)
    }

    /// INCRBY key amount
    pub fn incr_by(key: impl Into<String>, amount: i64) -> Self {
        Self::keyed(Command::IncrBy, key, Some(Value::Int(amount)))
    }

    /// DECRBY key amount
    pub fn decr_by(key: impl Into<String>, amount: i64) -> Self {
        Self::keyed(Command::DecrBy, key, Some(Value::Int(amount)))
    }

    /// APPEND key suffix
    pub fn append(key: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::keyed(Command::Append, key, Some(Value::String(suffix.into())))
    }

    /// RPUSH key element
    pub fn rpush(key: impl Into<String>, element: impl Into<Value>) -> Self {
        let element = match element.into() {
            Value::Null => Value::String(String::new()),
            v => v,
        };
        Self::keyed(Command::RPush, key, Some(element))
    }

    /// RPOP key
    pub fn rpop(key: impl Into<String>) -> Self {
        Self::keyed(Command::RPop, key, None)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            match arg {
                Value::String(s) if !s.is_empty() && !s.contains(char::is_whitespace) => {
                    write!(f, " {}", s)?
                }
                other => write!(f, " {}", other)?,
            }
        }
        Ok(())
    }
}

/// Unvalidated serde form: `{"command": "incr", "args": ["a"]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInstruction {
    command: String,
    #[serde(default)]
    args: Vec<Value>,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = Error;

    fn try_from(raw: RawInstruction) -> Result<Self> {
        Instruction::parse(&raw.command, raw.args)
    }
}

impl From<Instruction> for RawInstruction {
    fn from(instr: Instruction) -> Self {
        RawInstruction {
            command: instr.command.name().to_string(),
            args: instr.args,
        }
    }
}
