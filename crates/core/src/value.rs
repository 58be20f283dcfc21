//! Value types for redtxn
//!
//! This module defines the canonical [`Value`] carried in instruction
//! arguments and in successful replies.
//!
//! ## The Three Types
//!
//! 1. `Null` - absent key / nil reply
//! 2. `Int` - 64-bit signed integer
//! 3. `String` - UTF-8 encoded string
//!
//! ## Equality Rules
//!
//! - Different types are NEVER equal (no type coercion)
//! - `Int(1)` != `String("1")`
//!
//! Stores that keep everything as strings (Redis does) are free to coerce
//! on their side; the coordinator never does.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical value type.
///
/// Serialized untagged, so JSON `null`, `42` and `"abc"` map directly onto
/// `Null`, `Int(42)` and `String("abc")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent key / nil reply
    Null,

    /// 64-bit signed integer
    Int(i64),

    /// UTF-8 encoded string
    String(String),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Int(_) => "Int",
            Value::String(_) => "String",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Scalar values (`Int`, `String`) can be stored; `Null` cannot.
    pub fn is_scalar(&self) -> bool {
        !self.is_null()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "(nil)"),
            Value::Int(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
