#![allow(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::uninlined_format_args)]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! AFL fuzz target for structural JSON comparison.
//!
//! This target tests:
//! - Self-diff emptiness (reflexivity)
//! - Added/Removed role symmetry under side swap
//! - Run-to-run determinism of entry ordering
//! - Normalizer round-trip fidelity
//!
//! Run with:
//!   cargo afl build --release --features afl-fuzz --bin fuzz_compare
//!   cargo afl fuzz -i fuzz/corpus/compare -o fuzz/output/compare target/release/fuzz_compare

#[macro_use]
extern crate afl;

use oisin_diff::{DiffOptions, DiffStatus, diff_values, normalize};
use serde_json::Value;

/// Self-diff of any valid document is empty
fn fuzz_reflexivity(value: &Value) {
    let entries = diff_values(value, value, &DiffOptions::new()).unwrap();
    assert!(
        entries.is_empty(),
        "self-diff should be empty: value={:?}, entries={:?}",
        value,
        entries
    );
}

/// Swapping sides swaps Added and Removed at identical paths
fn fuzz_role_symmetry(left: &Value, right: &Value) {
    let options = DiffOptions::new();
    let forward = diff_values(left, right, &options).unwrap();
    let backward = diff_values(right, left, &options).unwrap();

    let mut forward_added: Vec<String> = forward
        .iter()
        .filter(|e| e.status == DiffStatus::Added)
        .map(|e| e.path.to_string())
        .collect();
    let mut backward_removed: Vec<String> = backward
        .iter()
        .filter(|e| e.status == DiffStatus::Removed)
        .map(|e| e.path.to_string())
        .collect();
    forward_added.sort();
    backward_removed.sort();

    assert_eq!(
        forward_added, backward_removed,
        "role symmetry violated: left={:?}, right={:?}",
        left, right
    );
}

/// Identical inputs produce byte-identical ordered output
fn fuzz_determinism(left: &Value, right: &Value) {
    let options = DiffOptions::new();
    let first = serde_json::to_vec(&diff_values(left, right, &options).unwrap()).unwrap();
    let second = serde_json::to_vec(&diff_values(left, right, &options).unwrap()).unwrap();
    assert_eq!(first, second, "non-deterministic diff ordering");
}

/// Normalizing and converting back preserves the document
fn fuzz_normalize_roundtrip(value: &Value) {
    let tree = normalize(value).unwrap();
    assert_eq!(
        &tree.to_value(),
        value,
        "normalize round-trip changed the document"
    );
}

fn main() {
    fuzz!(|data: &[u8]| {
        // Skip extremely large inputs
        if data.len() > 50_000 {
            return;
        }

        if data.len() < 2 {
            return;
        }
        let split = data.len() / 2;
        let left: Value = match serde_json::from_slice(&data[..split]) {
            Ok(v) => v,
            Err(_) => return,
        };
        let right: Value = match serde_json::from_slice(&data[split..]) {
            Ok(v) => v,
            Err(_) => return,
        };

        fuzz_reflexivity(&left);
        fuzz_reflexivity(&right);
        fuzz_normalize_roundtrip(&left);
        fuzz_normalize_roundtrip(&right);
        fuzz_role_symmetry(&left, &right);
        fuzz_determinism(&left, &right);
    });
}
