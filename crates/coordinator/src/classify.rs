//! Failure classification.
//!
//! Pure functions over a reply sequence. An index is failed iff its reply is
//! an error marker; nothing else about the reply matters.

use std::collections::BTreeSet;

use redtxn_core::{CommandFailure, Reply};

/// Sorted set of failed indices of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailedIndices(BTreeSet<usize>);

impl FailedIndices {
    /// Check if `index` failed
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Number of failed indices
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every command succeeded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failed indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for FailedIndices {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        FailedIndices(iter.into_iter().collect())
    }
}

/// Indices whose reply is an error marker.
pub fn classify(replies: &[Reply]) -> FailedIndices {
    replies
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_error())
        .map(|(i, _)| i)
        .collect()
}

/// Split indices into `(succeeded, failed)`, both ascending.
pub fn partition(replies: &[Reply]) -> (Vec<usize>, Vec<usize>) {
    (0..replies.len()).partition(|&i| !replies[i].is_error())
}

/// Every failed index paired with its error.
pub fn failures(replies: &[Reply]) -> Vec<CommandFailure> {
    replies
        .iter()
        .enumerate()
        .filter_map(|(index, r)| {
            r.error().map(|e| CommandFailure {
                index,
                error: e.clone(),
            })
        })
        .collect()
}
