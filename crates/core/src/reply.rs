//! Per-command replies.
//!
//! A batch yields one [`Reply`] per submitted instruction, in submission
//! order. The position is the only thing that ties a reply back to the
//! instruction that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

/// Category of a per-command rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Operation against a key holding the wrong kind of value
    WrongType,
    /// Value is not an integer or out of range
    NotAnInteger,
    /// Increment or decrement would overflow
    Overflow,
    /// Any other store-side rejection
    Rejected,
}

impl ErrorKind {
    /// Canonical code, as the store would prefix its message.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::WrongType => "WRONGTYPE",
            ErrorKind::NotAnInteger | ErrorKind::Overflow | ErrorKind::Rejected => "ERR",
        }
    }
}

/// Error marker in a reply slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    /// Category
    pub kind: ErrorKind,
    /// Human-readable message from the store
    pub message: String,
}

impl CommandError {
    /// Create a new command error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// `ERR value is not an integer or out of range`
    pub fn not_an_integer() -> Self {
        Self::new(ErrorKind::NotAnInteger, "value is not an integer or out of range")
    }

    /// `ERR increment or decrement would overflow`
    pub fn overflow() -> Self {
        Self::new(ErrorKind::Overflow, "increment or decrement would overflow")
    }

    /// `WRONGTYPE Operation against a key holding the wrong kind of value`
    pub fn wrong_type() -> Self {
        Self::new(
            ErrorKind::WrongType,
            "Operation against a key holding the wrong kind of value",
        )
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for CommandError {}

/// Result of one command in a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    /// Command applied; store returned this value
    Value(Value),
    /// Command rejected; it had no effect on the store
    Error(CommandError),
}

impl Reply {
    /// Check if this reply is an error marker
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Success value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Reply::Value(v) => Some(v),
            Reply::Error(_) => None,
        }
    }

    /// Error marker, if any
    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Reply::Value(_) => None,
            Reply::Error(e) => Some(e),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<Value, CommandError> {
        match self {
            Reply::Value(v) => Ok(v),
            Reply::Error(e) => Err(e),
        }
    }
}

impl From<Value> for Reply {
    fn from(v: Value) -> Self {
        Reply::Value(v)
    }
}

impl From<CommandError> for Reply {
    fn from(e: CommandError) -> Self {
        Reply::Error(e)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Value(v) => write!(f, "{}", v),
            Reply::Error(e) => write!(f, "(error) {}", e),
        }
    }
}

/// A failed command of the main batch, located by its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFailure {
    /// Position in the submitted batch
    pub index: usize,
    /// What the store said
    pub error: CommandError,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {}: {}", self.index, self.error)
    }
}
