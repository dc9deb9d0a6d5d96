// SPDX-License-Identifier: MIT OR Apache-2.0
//! Join-key inference heuristics.
//!
//! Given two arrays of objects, guess which field identifies a row, so
//! rows can be matched across the arrays instead of by position. The
//! policy, in order:
//!
//! 1. A candidate must be present in **every** row of **both** arrays and
//!    hold a scalar value in each.
//! 2. Candidates named exactly `id`, `name`, `key`, `code`, or `uuid` are
//!    tried first, in that order.
//! 3. Remaining candidates whose lower-cased name contains `id` are tried
//!    next, in lexicographic order. The order must not depend on which
//!    side is left: swapping the sides swaps Added and Removed but never
//!    changes which key aligns the rows.
//! 4. The first candidate whose values are unique within each side wins.
//!    No match means positional alignment; the heuristic never guesses
//!    further.
//!
//! Everything here is pure and independently testable; alignment itself
//! lives in [`crate::compute`].

use ahash::AHashSet;
use oisin_core::{ComparisonNode, LeafValue};

/// Field names treated as likely row identifiers, in priority order.
pub const PRIORITY_KEYS: [&str; 5] = ["id", "name", "key", "code", "uuid"];

/// Whether every element of `rows` is an object node.
///
/// Vacuously true for an empty array: there is no element of another kind.
#[must_use]
pub fn all_objects(rows: &[ComparisonNode]) -> bool {
    rows.iter().all(|row| row.as_object().is_some())
}

/// Stringified join-key value of `row.field`, if the field is present and
/// scalar. Objects and arrays cannot act as join-key values.
pub(crate) fn join_key_value(row: &ComparisonNode, field: &str) -> Option<String> {
    match row.get(field)?.as_leaf()? {
        LeafValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Infer a join key for two arrays of objects.
///
/// Returns `None` when either array is empty, when any element is not an
/// object, or when no candidate passes the policy above. `None` always
/// means positional alignment, never an error.
#[must_use]
pub fn infer_join_key(left: &[ComparisonNode], right: &[ComparisonNode]) -> Option<String> {
    if left.is_empty() || right.is_empty() || !all_objects(left) || !all_objects(right) {
        return None;
    }
    let candidates = common_fields(left, right);

    let prioritized = PRIORITY_KEYS
        .iter()
        .filter(|p| candidates.iter().any(|c| c == *p))
        .map(|p| (*p).to_string());
    let mut id_like: Vec<String> = candidates
        .iter()
        .filter(|c| !PRIORITY_KEYS.contains(&c.as_str()) && c.to_lowercase().contains("id"))
        .cloned()
        .collect();
    id_like.sort();

    prioritized
        .chain(id_like)
        .find(|field| unique_within(left, field) && unique_within(right, field))
}

/// All common fields of two arrays of objects, for surfacing candidate
/// join keys to a user: priority names first, the rest lexicographic.
///
/// Unlike [`infer_join_key`] this applies no uniqueness test; it only
/// enumerates what could be picked manually.
#[must_use]
pub fn candidate_join_keys(left: &[ComparisonNode], right: &[ComparisonNode]) -> Vec<String> {
    if left.is_empty() || right.is_empty() || !all_objects(left) || !all_objects(right) {
        return Vec::new();
    }
    let mut candidates = common_fields(left, right);
    candidates.sort_by_key(|c| {
        let rank = PRIORITY_KEYS
            .iter()
            .position(|p| p == c)
            .unwrap_or(PRIORITY_KEYS.len());
        (rank, c.clone())
    });
    candidates
}

/// Fields present in every row of both arrays, in the field order of the
/// first left row. Rows are known to be objects here.
fn common_fields(left: &[ComparisonNode], right: &[ComparisonNode]) -> Vec<String> {
    let Some(first) = left.first().and_then(ComparisonNode::as_object) else {
        return Vec::new();
    };
    first
        .iter()
        .map(|(k, _)| k)
        .filter(|k| {
            left.iter()
                .chain(right.iter())
                .all(|row| row.get(k).is_some())
        })
        .cloned()
        .collect()
}

/// Whether `field` is scalar in every row and its values never repeat.
fn unique_within(rows: &[ComparisonNode], field: &str) -> bool {
    let mut seen = AHashSet::with_capacity(rows.len());
    rows.iter().all(|row| {
        join_key_value(row, field).is_some_and(|value| seen.insert(value))
    })
}
