//! Supported store commands.
//!
//! The command set is closed: every command the coordinator can carry is a
//! variant of [`Command`], with its argument shape fixed by [`Command::signature`].
//! Resolving a command from its name happens once, when an instruction is
//! built; nothing downstream looks commands up by string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Expected type of a single argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// String naming a key; the empty string is a valid key
    Key,
    /// Integer amount
    Int,
    /// Any storable value (`Int` or `String`)
    Scalar,
}

impl ArgKind {
    /// Name used in validation messages
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Key => "key",
            ArgKind::Int => "integer",
            ArgKind::Scalar => "scalar",
        }
    }
}

/// A store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    /// GET key
    Get,
    /// SET key value
    Set,
    /// DEL key
    Del,
    /// EXISTS key
    Exists,
    /// INCR key
    Incr,
    /// DECR key
    Decr,
    /// INCRBY key amount
    IncrBy,
    /// DECRBY key amount
    DecrBy,
    /// APPEND key suffix
    Append,
    /// RPUSH key element
    RPush,
    /// RPOP key
    RPop,
}

impl Command {
    /// Every supported command
    pub const ALL: [Command; 11] = [
        Command::Get,
        Command::Set,
        Command::Del,
        Command::Exists,
        Command::Incr,
        Command::Decr,
        Command::IncrBy,
        Command::DecrBy,
        Command::Append,
        Command::RPush,
        Command::RPop,
    ];

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get => "GET",
            Command::Set => "SET",
            Command::Del => "DEL",
            Command::Exists => "EXISTS",
            Command::Incr => "INCR",
            Command::Decr => "DECR",
            Command::IncrBy => "INCRBY",
            Command::DecrBy => "DECRBY",
            Command::Append => "APPEND",
            Command::RPush => "RPUSH",
            Command::RPop => "RPOP",
        }
    }

    /// Argument shape, one entry per position
    pub fn signature(&self) -> &'static [ArgKind] {
        use ArgKind::*;
        match self {
            Command::Get | Command::Del | Command::Exists => &[Key],
            Command::Incr | Command::Decr | Command::RPop => &[Key],
            Command::Set | Command::Append | Command::RPush => &[Key, Scalar],
            Command::IncrBy | Command::DecrBy => &[Key, Int],
        }
    }

    /// Number of arguments
    pub fn arity(&self) -> usize {
        self.signature().len()
    }

    /// Check whether the command leaves the store unchanged
    pub fn is_read_only(&self) -> bool {
        matches!(self, Command::Get | Command::Exists)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = Error;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation(format!("unsupported command '{}'", s)))
    }
}
