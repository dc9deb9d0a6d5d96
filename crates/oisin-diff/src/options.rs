// SPDX-License-Identifier: MIT OR Apache-2.0
//! Comparison options: join-key configuration and unchanged reporting.

use ahash::AHashMap;

/// Ordered candidate field names for aligning rows of one array location.
///
/// Candidates are tried in order; the first one present in the rows is used
/// as the join key. An empty spec forces positional (index) alignment even
/// where inference would have found a key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinKeySpec {
    candidates: Vec<String>,
}

impl JoinKeySpec {
    /// Spec that forces positional alignment.
    #[must_use]
    pub const fn positional() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Ordered candidate field names.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Whether this spec falls back to positional alignment.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for JoinKeySpec {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            candidates: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for JoinKeySpec {
    fn from(candidates: Vec<String>) -> Self {
        Self { candidates }
    }
}

/// Options controlling one comparison run.
///
/// ```
/// use oisin_diff::{DiffOptions, JoinKeySpec};
///
/// let options = DiffOptions::new()
///     .with_join_key("$.users", ["id", "uuid"].into_iter().collect::<JoinKeySpec>())
///     .report_unchanged(true);
/// assert!(options.reports_unchanged());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    report_unchanged: bool,
    join_keys: AHashMap<String, JoinKeySpec>,
}

impl DiffOptions {
    /// Default options: elide unchanged entries, infer join keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain `Unchanged` entries in the output (completeness auditing).
    #[must_use]
    pub const fn report_unchanged(mut self, yes: bool) -> Self {
        self.report_unchanged = yes;
        self
    }

    /// Pin a join-key spec for the array at `config_path` (canonical
    /// config-key form, e.g. `$.users` or `$.data[].items`). Overrides
    /// inference at that location.
    #[must_use]
    pub fn with_join_key(mut self, config_path: impl Into<String>, spec: JoinKeySpec) -> Self {
        self.join_keys.insert(config_path.into(), spec);
        self
    }

    /// Whether `Unchanged` entries are retained.
    #[must_use]
    pub const fn reports_unchanged(&self) -> bool {
        self.report_unchanged
    }

    /// Configured spec for an array location, if any.
    #[must_use]
    pub fn join_key_for(&self, config_path: &str) -> Option<&JoinKeySpec> {
        self.join_keys.get(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_positional() {
        assert!(JoinKeySpec::positional().is_positional());
        assert!(JoinKeySpec::default().is_positional());
        let spec: JoinKeySpec = ["id"].into_iter().collect();
        assert!(!spec.is_positional());
    }

    #[test]
    fn lookup_is_by_config_path() {
        let options =
            DiffOptions::new().with_join_key("$.users", ["id"].into_iter().collect::<JoinKeySpec>());
        assert!(options.join_key_for("$.users").is_some());
        assert!(options.join_key_for("$.groups").is_none());
    }
}
