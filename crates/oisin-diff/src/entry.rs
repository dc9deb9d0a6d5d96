// SPDX-License-Identifier: MIT OR Apache-2.0
//! Diff output records.
//!
//! A comparison run produces an ordered `Vec<DiffEntry>`. Ordering is
//! deterministic for identical inputs: outer object keys in left-first
//! order, array rows in left-index order with unmatched right rows
//! appended. Presentation layers may filter and reorder freely; the core
//! never does.

use oisin_core::DiffPath;
use serde::{Serialize, Serializer};

/// Classification of one reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Present only on the right side.
    Added,
    /// Present only on the left side.
    Removed,
    /// Present on both sides with differing values or shapes.
    Changed,
    /// Present and equal on both sides. Only emitted when
    /// [`DiffOptions::report_unchanged`](crate::DiffOptions::report_unchanged)
    /// is set.
    Unchanged,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Removed => f.write_str("removed"),
            Self::Changed => f.write_str("changed"),
            Self::Unchanged => f.write_str("unchanged"),
        }
    }
}

impl DiffStatus {
    /// Parse the lowercase wire form produced by [`Display`](std::fmt::Display).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "added" => Some(Self::Added),
            "removed" => Some(Self::Removed),
            "changed" => Some(Self::Changed),
            "unchanged" => Some(Self::Unchanged),
            _ => None,
        }
    }
}

fn serialize_path<S: Serializer>(path: &DiffPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

/// One reported unit of difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    /// Location of the difference, from the document root.
    #[serde(serialize_with = "serialize_path")]
    pub path: DiffPath,
    /// What happened at that location.
    pub status: DiffStatus,
    /// Left-side value or subtree. Absent for [`DiffStatus::Added`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<serde_json::Value>,
    /// Right-side value or subtree. Absent for [`DiffStatus::Removed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<serde_json::Value>,
}

impl DiffEntry {
    /// A value present only on the right side.
    #[must_use]
    pub const fn added(path: DiffPath, right: serde_json::Value) -> Self {
        Self {
            path,
            status: DiffStatus::Added,
            left: None,
            right: Some(right),
        }
    }

    /// A value present only on the left side.
    #[must_use]
    pub const fn removed(path: DiffPath, left: serde_json::Value) -> Self {
        Self {
            path,
            status: DiffStatus::Removed,
            left: Some(left),
            right: None,
        }
    }

    /// A value that differs between the two sides.
    #[must_use]
    pub const fn changed(path: DiffPath, left: serde_json::Value, right: serde_json::Value) -> Self {
        Self {
            path,
            status: DiffStatus::Changed,
            left: Some(left),
            right: Some(right),
        }
    }

    /// A value equal on both sides, retained for completeness auditing.
    #[must_use]
    pub fn unchanged(path: DiffPath, value: serde_json::Value) -> Self {
        Self {
            path,
            status: DiffStatus::Unchanged,
            left: Some(value.clone()),
            right: Some(value),
        }
    }
}
