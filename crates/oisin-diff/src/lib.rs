// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Structural JSON comparison
//!
//! Compare two JSON documents and report their structural differences as
//! an ordered list of [`DiffEntry`] records with paths and statuses.
//!
//! ## Comparison model
//!
//! Inputs are canonicalized into comparison trees (`oisin-core`), then
//! walked pairwise:
//!
//! - **Objects** compare by key union, left key order first.
//! - **Arrays of objects** align rows by a join key: configured per path
//!   via [`DiffOptions::with_join_key`], or inferred by the heuristics in
//!   [`infer_join_key`]. Everything else aligns by index.
//! - **Leaves** compare by value, with integer/float representations
//!   canonicalized (`1 == 1.0`).
//!
//! The walk is pure and synchronous; identical inputs always produce a
//! byte-identical entry sequence.
//!
//! ## Example
//!
//! ```
//! use oisin_diff::{DiffOptions, DiffStatus, diff_values};
//! use serde_json::json;
//!
//! let left = json!([{"id": 1, "v": "a"}, {"id": 2, "v": "b"}]);
//! let right = json!([{"id": 2, "v": "c"}, {"id": 3, "v": "d"}]);
//! let entries = diff_values(&left, &right, &DiffOptions::new()).unwrap();
//!
//! let report: Vec<(String, DiffStatus)> = entries
//!     .iter()
//!     .map(|e| (e.path.to_string(), e.status))
//!     .collect();
//! assert_eq!(report, vec![
//!     ("[id=1]".to_string(), DiffStatus::Removed),
//!     ("[id=2].v".to_string(), DiffStatus::Changed),
//!     ("[id=3]".to_string(), DiffStatus::Added),
//! ]);
//! ```

mod compute;
mod entry;
mod filter;
mod infer;
mod options;

pub use compute::{diff, diff_values};
pub use entry::{DiffEntry, DiffStatus};
pub use filter::{FilterSpec, apply_filters, distinct_keys, suggested_exclusions};
pub use infer::{PRIORITY_KEYS, all_objects, candidate_join_keys, infer_join_key};
pub use options::{DiffOptions, JoinKeySpec};

pub use oisin_core::{CompareError, ComparisonNode, DiffPath, PathSegment, Result, normalize};
