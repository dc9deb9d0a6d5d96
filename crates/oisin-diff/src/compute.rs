// SPDX-License-Identifier: MIT OR Apache-2.0
//! The differ: recursive structural comparison of two comparison trees.
//!
//! Dispatch is by the pair of node kinds:
//!
//! - leaf vs leaf: value equality (numbers canonicalized)
//! - object vs object: union of keys, left key order first
//! - array vs array: join-key alignment when a key is configured or
//!   inferred, positional alignment otherwise
//! - mismatched kinds: one `Changed` entry for the whole subtree
//!
//! The walk is synchronous, allocation is bounded by input size, and the
//! output order is deterministic: identical inputs always produce an
//! identical entry sequence.

use oisin_core::{ComparisonNode, CompareError, DiffPath, PathSegment, Result, normalize};

use crate::entry::DiffEntry;
use crate::infer::{all_objects, infer_join_key, join_key_value};
use crate::options::DiffOptions;
use ahash::{AHashMap, AHashSet};

/// Compare two comparison trees and return the ordered difference list.
///
/// # Errors
///
/// Returns [`CompareError::Configuration`] when a configured join-key path
/// names a location that is not an array of objects on both sides. All
/// other structural ambiguity resolves by documented fallback.
pub fn diff(
    left: &ComparisonNode,
    right: &ComparisonNode,
    options: &DiffOptions,
) -> Result<Vec<DiffEntry>> {
    let mut entries = Vec::new();
    walk(left, right, &DiffPath::root(), options, &mut entries)?;
    Ok(entries)
}

/// Normalize two parsed JSON values and compare them.
///
/// # Errors
///
/// Returns [`CompareError::MalformedInput`] if either value cannot be
/// canonicalized, or [`CompareError::Configuration`] as for [`diff`].
pub fn diff_values(
    left: &serde_json::Value,
    right: &serde_json::Value,
    options: &DiffOptions,
) -> Result<Vec<DiffEntry>> {
    diff(&normalize(left)?, &normalize(right)?, options)
}

fn walk(
    left: &ComparisonNode,
    right: &ComparisonNode,
    path: &DiffPath,
    options: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) -> Result<()> {
    match (left, right) {
        (ComparisonNode::Leaf(a), ComparisonNode::Leaf(b)) => {
            if a == b {
                if options.reports_unchanged() {
                    out.push(DiffEntry::unchanged(path.clone(), left.to_value()));
                }
            } else {
                out.push(DiffEntry::changed(
                    path.clone(),
                    left.to_value(),
                    right.to_value(),
                ));
            }
            Ok(())
        }
        (ComparisonNode::Object(lf), ComparisonNode::Object(rf)) => {
            object_diff(lf, rf, left, right, path, options, out)
        }
        (ComparisonNode::Array(li), ComparisonNode::Array(ri)) => {
            array_diff(li, ri, path, options, out)
        }
        // Mismatched kinds: shapes differ, nothing to recurse into.
        _ => {
            out.push(DiffEntry::changed(
                path.clone(),
                left.to_value(),
                right.to_value(),
            ));
            Ok(())
        }
    }
}

fn object_diff(
    left_fields: &[(String, ComparisonNode)],
    right_fields: &[(String, ComparisonNode)],
    left: &ComparisonNode,
    right: &ComparisonNode,
    path: &DiffPath,
    options: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) -> Result<()> {
    // Union of keys: left's key order, then right-only keys in right order.
    for (key, left_child) in left_fields {
        let child_path = path.child(PathSegment::Key(key.clone()));
        match right.get(key) {
            Some(right_child) => walk(left_child, right_child, &child_path, options, out)?,
            None => out.push(DiffEntry::removed(child_path, left_child.to_value())),
        }
    }
    for (key, right_child) in right_fields {
        if left.get(key).is_none() {
            let child_path = path.child(PathSegment::Key(key.clone()));
            out.push(DiffEntry::added(child_path, right_child.to_value()));
        }
    }
    Ok(())
}

fn array_diff(
    left_items: &[ComparisonNode],
    right_items: &[ComparisonNode],
    path: &DiffPath,
    options: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) -> Result<()> {
    if left_items.is_empty() && right_items.is_empty() {
        if options.reports_unchanged() {
            out.push(DiffEntry::unchanged(path.clone(), serde_json::json!([])));
        }
        return Ok(());
    }

    match options.join_key_for(&path.config_key()) {
        Some(spec) if !spec.is_positional() => {
            if !all_objects(left_items) || !all_objects(right_items) {
                return Err(CompareError::Configuration {
                    path: path.config_key(),
                    reason: "join key configured but the location is not an array of objects \
                             on both sides"
                        .to_string(),
                });
            }
            let field = pick_candidate(spec.candidates(), left_items, right_items);
            keyed_diff(left_items, right_items, field, path, options, out)
        }
        // An explicitly empty spec pins positional alignment.
        Some(_) => positional_diff(left_items, right_items, path, options, out),
        None => match infer_join_key(left_items, right_items) {
            Some(field) => keyed_diff(left_items, right_items, &field, path, options, out),
            None => positional_diff(left_items, right_items, path, options, out),
        },
    }
}

/// First configured candidate present in at least one row of either side.
/// When none is present anywhere the first candidate stands, and every row
/// reports as unmatched rather than erroring.
fn pick_candidate<'a>(
    candidates: &'a [String],
    left_items: &[ComparisonNode],
    right_items: &[ComparisonNode],
) -> &'a str {
    candidates
        .iter()
        .find(|c| {
            left_items
                .iter()
                .chain(right_items.iter())
                .any(|row| row.get(c).is_some())
        })
        .unwrap_or(&candidates[0])
}

/// Align rows by join-key value.
///
/// Left rows drive the output order; unmatched right rows append in right
/// order. A duplicated key value within one side keeps its first-seen row
/// as the index entry and reports later rows as unmatched, since
/// uniqueness cannot be assumed to hold. Rows missing the key (or holding
/// a non-scalar under it) are unmatched and keep a positional segment.
fn keyed_diff(
    left_items: &[ComparisonNode],
    right_items: &[ComparisonNode],
    field: &str,
    path: &DiffPath,
    options: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) -> Result<()> {
    let mut right_index: AHashMap<String, usize> = AHashMap::with_capacity(right_items.len());
    for (i, row) in right_items.iter().enumerate() {
        if let Some(value) = join_key_value(row, field) {
            right_index.entry(value).or_insert(i);
        }
    }

    let mut left_seen: AHashSet<String> = AHashSet::with_capacity(left_items.len());
    let mut consumed: AHashSet<String> = AHashSet::with_capacity(left_items.len());
    for (i, row) in left_items.iter().enumerate() {
        let Some(value) = join_key_value(row, field) else {
            out.push(DiffEntry::removed(
                path.child(PathSegment::Index(i)),
                row.to_value(),
            ));
            continue;
        };
        let row_path = path.child(PathSegment::KeyMatch {
            field: field.to_string(),
            value: value.clone(),
        });
        if !left_seen.insert(value.clone()) {
            // Duplicate key on the left: extra row, unmatched.
            out.push(DiffEntry::removed(row_path, row.to_value()));
            continue;
        }
        match right_index.get(&value) {
            Some(&j) => {
                consumed.insert(value);
                walk(row, &right_items[j], &row_path, options, out)?;
            }
            None => out.push(DiffEntry::removed(row_path, row.to_value())),
        }
    }

    for (j, row) in right_items.iter().enumerate() {
        let Some(value) = join_key_value(row, field) else {
            out.push(DiffEntry::added(
                path.child(PathSegment::Index(j)),
                row.to_value(),
            ));
            continue;
        };
        let first_seen = right_index.get(&value) == Some(&j);
        if first_seen && consumed.contains(&value) {
            continue;
        }
        out.push(DiffEntry::added(
            path.child(PathSegment::KeyMatch {
                field: field.to_string(),
                value,
            }),
            row.to_value(),
        ));
    }
    Ok(())
}

/// Align rows by index; the longer side's tail reports wholesale.
fn positional_diff(
    left_items: &[ComparisonNode],
    right_items: &[ComparisonNode],
    path: &DiffPath,
    options: &DiffOptions,
    out: &mut Vec<DiffEntry>,
) -> Result<()> {
    let common = left_items.len().min(right_items.len());
    for i in 0..common {
        let child_path = path.child(PathSegment::Index(i));
        walk(&left_items[i], &right_items[i], &child_path, options, out)?;
    }
    for (i, row) in left_items.iter().enumerate().skip(common) {
        out.push(DiffEntry::removed(
            path.child(PathSegment::Index(i)),
            row.to_value(),
        ));
    }
    for (i, row) in right_items.iter().enumerate().skip(common) {
        out.push(DiffEntry::added(
            path.child(PathSegment::Index(i)),
            row.to_value(),
        ));
    }
    Ok(())
}
