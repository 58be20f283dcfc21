//! In-process store with Redis-style command semantics.
//!
//! # Design
//!
//! - One `Mutex<FxHashMap>` holds every key. A batch takes the lock once and
//!   runs all of its commands before releasing it, which is exactly the
//!   queue-level atomicity a real store gives: no interleaving, no rollback.
//! - Values are kept as strings or lists of strings. Counters are strings
//!   that happen to parse as `i64`, so `INCR` on `"123e"` fails the same way
//!   it does on a real store.
//! - A rejected command yields an error reply at its index and leaves the
//!   data untouched; the rest of the batch still runs.
//!
//! # Test hooks
//!
//! Every submission, including ones that fail on the transport, is recorded
//! so tests can assert on exactly what was sent. Transport failures are
//! injected through a [`FaultPlan`].
//!
//! # Example
//!
//! ```
//! use redtxn_client::{MemoryStore, StoreClient};
//! use redtxn_core::{Instruction, Reply, Value};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! store.set("b", "123e");
//!
//! let replies = store
//!     .submit_batch(&[Instruction::incr("a"), Instruction::incr("b")])
//!     .await
//!     .unwrap();
//!
//! assert_eq!(replies[0], Reply::Value(Value::Int(1)));
//! assert!(replies[1].is_error());
//! # });
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use redtxn_core::{Command, CommandError, Instruction, Reply, TransportError, Value};

use crate::fault::{Fault, FaultPlan};
use crate::StoreClient;

/// A stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Str(String),
    List(VecDeque<String>),
}

/// In-memory [`StoreClient`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<FxHashMap<String, Entry>>,
    /// Every submission in arrival order, including failed ones
    submissions: Mutex<Vec<Vec<Instruction>>>,
    /// Next submission ordinal
    ordinal: AtomicU64,
    faults: FaultPlan,
    latency: Option<Duration>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every round trip by `latency` before the batch is applied.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Use `faults` to decide which submissions fail.
    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    /// Fail the submission with the given ordinal (0-based).
    pub fn fail_submission(&self, ordinal: u64, fault: Fault) {
        self.faults.schedule(ordinal, fault);
    }

    /// Fail the next submission this store receives.
    pub fn fail_next(&self, fault: Fault) {
        self.faults.schedule(self.ordinal.load(Ordering::SeqCst), fault);
    }

    // =========================================================================
    // Direct access (outside of any batch)
    // =========================================================================

    /// Set a string value directly, bypassing batch submission.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let value = scalar_to_string(&value.into());
        self.data.lock().insert(key.into(), Entry::Str(value));
    }

    /// Read a string value. Lists read as `None`.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.data.lock().get(key) {
            Some(Entry::Str(s)) => Some(Value::String(s.clone())),
            _ => None,
        }
    }

    /// Read a string value as an integer, if it parses as one.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)
            .and_then(|v| v.as_str().and_then(|s| s.parse().ok()))
    }

    /// Read a list value.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        match self.data.lock().get(key) {
            Some(Entry::List(items)) => Some(items.iter().cloned().collect()),
            _ => None,
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// A sorted copy of every string key and its value.
    ///
    /// Lists are rendered as their elements joined by `,`, which is enough
    /// to compare states in tests.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.data
            .lock()
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Entry::Str(s) => s.clone(),
                    Entry::List(items) => items.iter().cloned().collect::<Vec<_>>().join(","),
                };
                (k.clone(), rendered)
            })
            .collect()
    }

    /// Every batch submitted so far, in arrival order.
    pub fn submissions(&self) -> Vec<Vec<Instruction>> {
        self.submissions.lock().clone()
    }

    /// Number of batches submitted so far
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().len()
    }

    /// Run `batch` against the data under one lock acquisition.
    fn apply_batch(&self, batch: &[Instruction]) -> Vec<Reply> {
        let mut data = self.data.lock();
        batch.iter().map(|instr| apply(&mut data, instr)).collect()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn submit_batch(&self, batch: &[Instruction]) -> Result<Vec<Reply>, TransportError> {
        let ordinal = self.ordinal.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().push(batch.to_vec());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.faults.take(ordinal) {
            Some(fault) => {
                if fault.applies_batch() {
                    let _ = self.apply_batch(batch);
                }
                warn!(ordinal, batch_len = batch.len(), fault = ?fault, "Injected transport fault");
                Err(fault.to_transport_error(ordinal))
            }
            None => {
                let replies = self.apply_batch(batch);
                debug!(
                    ordinal,
                    batch_len = batch.len(),
                    errors = replies.iter().filter(|r| r.is_error()).count(),
                    "Applied batch"
                );
                Ok(replies)
            }
        }
    }
}

// =============================================================================
// Command semantics
// =============================================================================

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int(i) => i.to_string(),
        Value::String(s) => s.clone(),
    }
}

fn arg(instr: &Instruction, pos: usize) -> &Value {
    &instr.args()[pos]
}

/// Apply one validated instruction.
fn apply(data: &mut FxHashMap<String, Entry>, instr: &Instruction) -> Reply {
    let key = instr.key();
    let result = match instr.command() {
        Command::Get => match data.get(key) {
            None => Ok(Value::Null),
            Some(Entry::Str(s)) => Ok(Value::String(s.clone())),
            Some(Entry::List(_)) => Err(CommandError::wrong_type()),
        },
        Command::Set => {
            data.insert(key.to_string(), Entry::Str(scalar_to_string(arg(instr, 1))));
            Ok(Value::from("OK"))
        }
        Command::Del => Ok(Value::Int(data.remove(key).is_some() as i64)),
        Command::Exists => Ok(Value::Int(data.contains_key(key) as i64)),
        Command::Incr => add(data, key, 1),
        Command::Decr => add(data, key, -1),
        Command::IncrBy => match arg(instr, 1).as_int() {
            Some(n) => add(data, key, n),
            None => Err(CommandError::not_an_integer()),
        },
        Command::DecrBy => match arg(instr, 1).as_int().and_then(i64::checked_neg) {
            Some(n) => add(data, key, n),
            None => Err(CommandError::overflow()),
        },
        Command::Append => {
            let suffix = scalar_to_string(arg(instr, 1));
            match data
                .entry(key.to_string())
                .or_insert_with(|| Entry::Str(String::new()))
            {
                Entry::Str(s) => {
                    s.push_str(&suffix);
                    Ok(Value::Int(s.len() as i64))
                }
                Entry::List(_) => Err(CommandError::wrong_type()),
            }
        }
        Command::RPush => {
            let element = scalar_to_string(arg(instr, 1));
            match data
                .entry(key.to_string())
                .or_insert_with(|| Entry::List(VecDeque::new()))
            {
                Entry::List(items) => {
                    items.push_back(element);
                    Ok(Value::Int(items.len() as i64))
                }
                Entry::Str(_) => Err(CommandError::wrong_type()),
            }
        }
        Command::RPop => match data.get_mut(key) {
            None => Ok(Value::Null),
            Some(Entry::Str(_)) => Err(CommandError::wrong_type()),
            Some(Entry::List(items)) => {
                let popped = items.pop_back();
                if items.is_empty() {
                    data.remove(key);
                }
                Ok(popped.map(Value::String).unwrap_or(Value::Null))
            }
        },
    };

    match result {
        Ok(v) => Reply::Value(v),
        Err(e) => Reply::Error(e),
    }
}

/// Shared body of INCR/DECR/INCRBY/DECRBY. Missing keys count as 0.
fn add(
    data: &mut FxHashMap<String, Entry>,
    key: &str,
    delta: i64,
) -> Result<Value, CommandError> {
    let current = match data.get(key) {
        None => 0,
        Some(Entry::Str(s)) => s.parse::<i64>().map_err(|_| CommandError::not_an_integer())?,
        Some(Entry::List(_)) => return Err(CommandError::wrong_type()),
    };
    let next = current
        .checked_add(delta)
        .ok_or_else(CommandError::overflow)?;
    data.insert(key.to_string(), Entry::Str(next.to_string()));
    Ok(Value::Int(next))
}
