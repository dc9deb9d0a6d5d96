// SPDX-License-Identifier: MIT OR Apache-2.0
//! Candidate join-key discovery across two whole documents.
//!
//! Walks both trees in lockstep and, for every location where both sides
//! are arrays of objects, surfaces the fields a user could pin with
//! `--join-key`. Discovery only descends where both sides agree on shape;
//! mismatched locations are the differ's business, not this report's.

use oisin_core::{ComparisonNode, DiffPath, PathSegment};
use oisin_diff::candidate_join_keys;

/// Candidate join keys per array config path, in document order.
#[must_use]
pub fn candidate_keys_by_path(
    left: &ComparisonNode,
    right: &ComparisonNode,
) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    walk(left, right, &DiffPath::root(), &mut out);
    out
}

fn walk(
    left: &ComparisonNode,
    right: &ComparisonNode,
    path: &DiffPath,
    out: &mut Vec<(String, Vec<String>)>,
) {
    match (left, right) {
        (ComparisonNode::Object(fields), ComparisonNode::Object(_)) => {
            for (key, left_child) in fields {
                if let Some(right_child) = right.get(key) {
                    let child_path = path.child(PathSegment::Key(key.clone()));
                    walk(left_child, right_child, &child_path, out);
                }
            }
        }
        (ComparisonNode::Array(left_items), ComparisonNode::Array(right_items)) => {
            let candidates = candidate_join_keys(left_items, right_items);
            if !candidates.is_empty() {
                out.push((path.config_key(), candidates));
            }
            // Nested arrays inside rows still deserve a look.
            for (i, (l, r)) in left_items.iter().zip(right_items.iter()).enumerate() {
                let child_path = path.child(PathSegment::Index(i));
                walk(l, r, &child_path, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oisin_core::normalize;
    use serde_json::json;

    fn report(left: serde_json::Value, right: serde_json::Value) -> Vec<(String, Vec<String>)> {
        candidate_keys_by_path(&normalize(&left).unwrap(), &normalize(&right).unwrap())
    }

    #[test]
    fn finds_arrays_at_any_depth() {
        let left = json!({
            "users": [{"id": 1, "tags": [{"code": "a"}]}],
            "misc": [1, 2]
        });
        let right = json!({
            "users": [{"id": 2, "tags": [{"code": "b"}]}],
            "misc": [1]
        });
        let found = report(left, right);
        assert_eq!(found[0].0, "$.users");
        assert!(found[0].1.contains(&"id".to_string()));
        assert_eq!(found[1].0, "$.users[].tags");
        assert_eq!(found[1].1, vec!["code"]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn scalar_arrays_yield_nothing() {
        assert!(report(json!([1, 2, 3]), json!([1, 2])).is_empty());
    }

    #[test]
    fn mismatched_shapes_stop_discovery() {
        let found = report(json!({"a": [{"id": 1}]}), json!({"a": 5}));
        assert!(found.is_empty());
    }
}
