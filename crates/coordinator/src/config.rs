//! Coordinator configuration.
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! elide_empty_batches = true
//! max_batch_len = 512
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use redtxn_core::{Error, Result};

/// Tunables for a [`TransactionCoordinator`](crate::TransactionCoordinator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// Skip the round trip for empty batches
    #[serde(default = "default_true")]
    pub elide_empty_batches: bool,

    /// Reject plans with more steps than this before anything is sent
    #[serde(default)]
    pub max_batch_len: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            elide_empty_batches: default_true(),
            max_batch_len: None,
        }
    }
}

impl CoordinatorConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set empty-batch elision.
    pub fn elide_empty_batches(mut self, elide: bool) -> Self {
        self.elide_empty_batches = elide;
        self
    }

    /// Cap the number of steps a plan may have.
    pub fn max_batch_len(mut self, max: usize) -> Self {
        self.max_batch_len = Some(max);
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CoordinatorConfig =
            toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_batch_len == Some(0) {
            return Err(Error::Config("max_batch_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Check a plan of `len` steps fits within `max_batch_len`.
    pub(crate) fn check_plan_len(&self, len: usize) -> Result<()> {
        match self.max_batch_len {
            Some(max) if len > max => Err(Error::validation(format!(
                "plan has {} step(s), exceeding max_batch_len of {}",
                len, max
            ))),
            _ => Ok(()),
        }
    }
}
