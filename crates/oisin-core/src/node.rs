// SPDX-License-Identifier: MIT OR Apache-2.0
//! The comparison tree: canonical in-memory representation of a JSON value.
//!
//! [`normalize`] turns an already-parsed [`serde_json::Value`] into a
//! [`ComparisonNode`] tree. The tree is immutable once built; the differ
//! only ever reads it, so sharing a tree across concurrent comparison
//! calls is safe.
//!
//! A node's kind fully determines its payload: a leaf carries a scalar, an
//! object carries ordered key/child pairs, an array carries ordered items.
//! No node mixes shapes.

use crate::error::{CompareError, Result};

/// The three structural kinds a comparison node can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Scalar value: null, boolean, number, or string.
    Leaf,
    /// Key/value mapping with unique keys and preserved insertion order.
    Object,
    /// Ordered sequence of child nodes.
    Array,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf => f.write_str("leaf"),
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// Canonical numeric value.
///
/// JSON does not distinguish integer from float, so equality canonicalizes
/// across representations: `1`, `1.0`, and an unsigned `1` all compare
/// equal. Integer-vs-float comparison is exact at full integer precision,
/// so `9007199254740993` does not equal `9007199254740992.0` even though
/// the float cannot represent the odd value. There is no epsilon.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed integer representation.
    Int(i64),
    /// Unsigned representation for values above `i64::MAX`.
    UInt(u64),
    /// Finite floating point representation.
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u64::try_from(a).is_ok_and(|a| a == b)
            }
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                float_matches_i64(b, a)
            }
            (Self::UInt(a), Self::Float(b)) | (Self::Float(b), Self::UInt(a)) => {
                float_matches_u64(b, a)
            }
        }
    }
}

// Widening the integer to f64 is lossy above 2^53, which would equate
// adjacent integers. Instead the float must be integral, in range, and
// convert back to the exact same integer.
#[allow(clippy::cast_possible_truncation)]
fn float_matches_i64(f: f64, i: i64) -> bool {
    f.fract() == 0.0
        && f >= -9_223_372_036_854_775_808.0
        && f < 9_223_372_036_854_775_808.0
        && f as i64 == i
}

#[allow(clippy::cast_possible_truncation)]
fn float_matches_u64(f: f64, u: u64) -> bool {
    f.fract() == 0.0 && f >= 0.0 && f < 18_446_744_073_709_551_616.0 && f as u64 == u
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Scalar payload of a leaf node.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    /// JSON `null`. A value in its own right, distinct from an absent key.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, canonicalized across integer/float representations.
    Number(Number),
    /// JSON string.
    String(String),
}

impl std::fmt::Display for LeafValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Canonical internal representation of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonNode {
    /// Scalar leaf.
    Leaf(LeafValue),
    /// Object with insertion-ordered, unique keys.
    Object(Vec<(String, ComparisonNode)>),
    /// Ordered array of child nodes.
    Array(Vec<ComparisonNode>),
}

impl ComparisonNode {
    /// Structural kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Leaf(_) => NodeKind::Leaf,
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
        }
    }

    /// Field lookup on an object node. Returns `None` for non-objects and
    /// missing keys alike. Keys are unique, so a linear scan suffices.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Leaf payload, if this node is a leaf.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafValue> {
        match self {
            Self::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Object fields, if this node is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Array items, if this node is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Convert the subtree back into a [`serde_json::Value`] for reporting.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Leaf(LeafValue::Null) => serde_json::Value::Null,
            Self::Leaf(LeafValue::Bool(b)) => serde_json::Value::Bool(*b),
            Self::Leaf(LeafValue::Number(n)) => match *n {
                Number::Int(i) => serde_json::Value::Number(i.into()),
                Number::UInt(u) => serde_json::Value::Number(u.into()),
                Number::Float(x) => serde_json::Number::from_f64(x)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number),
            },
            Self::Leaf(LeafValue::String(s)) => serde_json::Value::String(s.clone()),
            Self::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_value).collect())
            }
        }
    }
}

/// Canonicalize an already-parsed JSON value into a comparison tree.
///
/// Pure and side-effect free. Object key order is preserved as parsed
/// (duplicate keys cannot survive parsing; a parser that permits them keeps
/// the last occurrence). Non-finite numbers are rejected rather than
/// silently folded into a leaf.
///
/// # Errors
///
/// Returns [`CompareError::MalformedInput`] if the value contains a number
/// that is neither an integer nor a finite float.
pub fn normalize(value: &serde_json::Value) -> Result<ComparisonNode> {
    match value {
        serde_json::Value::Null => Ok(ComparisonNode::Leaf(LeafValue::Null)),
        serde_json::Value::Bool(b) => Ok(ComparisonNode::Leaf(LeafValue::Bool(*b))),
        serde_json::Value::Number(n) => normalize_number(n).map(|n| {
            ComparisonNode::Leaf(LeafValue::Number(n))
        }),
        serde_json::Value::String(s) => Ok(ComparisonNode::Leaf(LeafValue::String(s.clone()))),
        serde_json::Value::Array(items) => items
            .iter()
            .map(normalize)
            .collect::<Result<Vec<_>>>()
            .map(ComparisonNode::Array),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| normalize(v).map(|node| (k.clone(), node)))
            .collect::<Result<Vec<_>>>()
            .map(ComparisonNode::Object),
    }
}

fn normalize_number(n: &serde_json::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::Int(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::UInt(u));
    }
    match n.as_f64() {
        Some(x) if x.is_finite() => Ok(Number::Float(x)),
        _ => Err(CompareError::MalformedInput(format!(
            "non-finite or unrepresentable number: {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_normalize_to_leaves() {
        for value in [json!(null), json!(true), json!(42), json!("hi")] {
            let node = normalize(&value).unwrap();
            assert_eq!(node.kind(), NodeKind::Leaf);
        }
    }

    #[test]
    fn object_preserves_insertion_order() {
        let value = serde_json::from_str::<serde_json::Value>(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let node = normalize(&value).unwrap();
        let keys: Vec<&str> = node
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn array_preserves_element_order() {
        let node = normalize(&json!([3, 1, 2])).unwrap();
        let items = node.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0],
            ComparisonNode::Leaf(LeafValue::Number(Number::Int(3)))
        );
    }

    #[test]
    fn integer_and_float_representations_compare_equal() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_eq!(Number::UInt(7), Number::Int(7));
        assert_eq!(Number::UInt(2), Number::Float(2.0));
        assert_ne!(Number::Int(1), Number::Float(1.5));
        assert_ne!(Number::Int(-1), Number::UInt(u64::MAX));
    }

    #[test]
    fn float_equality_stays_exact_above_float_integer_precision() {
        // 2^53 + 1 is not representable as f64; widening must not round.
        assert_ne!(Number::Int(9_007_199_254_740_993), Number::Float(9_007_199_254_740_992.0));
        assert_eq!(Number::Int(9_007_199_254_740_992), Number::Float(9_007_199_254_740_992.0));
        assert_ne!(Number::UInt(u64::MAX), Number::Float(u64::MAX as f64));
        assert_ne!(Number::Int(i64::MAX), Number::Float(9_223_372_036_854_775_808.0));
        assert_ne!(Number::Int(0), Number::Float(f64::INFINITY));
    }

    #[test]
    fn null_is_a_value_not_absence() {
        let node = normalize(&json!({ "a": null })).unwrap();
        assert_eq!(
            node.get("a"),
            Some(&ComparisonNode::Leaf(LeafValue::Null))
        );
        assert_eq!(node.get("b"), None);
    }

    #[test]
    fn round_trips_back_to_value() {
        let value = json!({"a": [1, {"b": null}], "c": "x", "d": 1.5});
        let node = normalize(&value).unwrap();
        assert_eq!(node.to_value(), value);
    }
}
