// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presentation-side helpers: filter a diff and enumerate filterable keys.
//!
//! These consume the differ's output; they never change what was compared.

use ahash::AHashSet;

use crate::entry::{DiffEntry, DiffStatus};

/// Key names that usually churn between captures of the same document.
const VOLATILE_KEY_HINTS: [&str; 4] = ["timestamp", "created_at", "updated_at", "run_id"];

/// Which entries a presentation layer wants to keep.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    excluded_keys: Vec<String>,
    statuses: Option<Vec<DiffStatus>>,
}

impl FilterSpec {
    /// Keep everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries whose path contains the object key `key` at any depth.
    #[must_use]
    pub fn exclude_key(mut self, key: impl Into<String>) -> Self {
        self.excluded_keys.push(key.into());
        self
    }

    /// Keep only entries with one of the given statuses.
    #[must_use]
    pub fn only_statuses(mut self, statuses: impl IntoIterator<Item = DiffStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    fn keeps(&self, entry: &DiffEntry) -> bool {
        if let Some(statuses) = &self.statuses
            && !statuses.contains(&entry.status)
        {
            return false;
        }
        !entry
            .path
            .key_names()
            .any(|name| self.excluded_keys.iter().any(|k| k == name))
    }
}

/// Apply a filter to a diff, preserving entry order.
#[must_use]
pub fn apply_filters(entries: &[DiffEntry], spec: &FilterSpec) -> Vec<DiffEntry> {
    entries
        .iter()
        .filter(|entry| spec.keeps(entry))
        .cloned()
        .collect()
}

/// Distinct object key names appearing in a diff, sorted. Index and
/// join-key segments are skipped; they identify rows, not fields a user
/// would exclude.
#[must_use]
pub fn distinct_keys(entries: &[DiffEntry]) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut keys: Vec<String> = entries
        .iter()
        .flat_map(|entry| entry.path.key_names())
        .filter(|name| seen.insert((*name).to_string()))
        .map(ToString::to_string)
        .collect();
    keys.sort();
    keys
}

/// Subset of `keys` that look volatile (timestamps, run identifiers) and
/// are worth excluding by default when auditing two captures.
#[must_use]
pub fn suggested_exclusions(keys: &[String]) -> Vec<String> {
    keys.iter()
        .filter(|key| {
            let lower = key.to_lowercase();
            VOLATILE_KEY_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .cloned()
        .collect()
}
