// SPDX-License-Identifier: MIT OR Apache-2.0
// Benchmarks: missing_docs - criterion_group! macro generates undocumentable code
#![allow(missing_docs)]
// Benchmarks: clippy lints relaxed for benchmark code (not production)
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Benchmarks for structural JSON comparison.
//!
//! Covers the three alignment regimes separately:
//! - object/leaf recursion
//! - positional array alignment
//! - join-key array alignment (inferred and configured)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oisin_diff::{DiffOptions, JoinKeySpec, diff, diff_values, normalize};
use serde_json::{Value, json};
use std::hint::black_box;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Generate left and right JSON pairs for comparison benchmarks
fn generate_pairs(scenario: &str) -> (Value, Value) {
    match scenario {
        "identical_small" => {
            let doc = json!({"name": "Alice", "age": 30, "active": true});
            (doc.clone(), doc)
        }

        "identical_keyed_rows" => {
            let doc = json!({
                "users": (0..100).map(|i| json!({
                    "id": i,
                    "name": format!("User{}", i),
                    "email": format!("user{}@example.com", i),
                    "active": i % 2 == 0
                })).collect::<Vec<_>>()
            });
            (doc.clone(), doc)
        }

        "keyed_rows_drift" => {
            // Rows 0..90 shared (10 changed), 90..100 only-left, 100..110 only-right.
            let left = json!({
                "users": (0..100).map(|i| json!({
                    "id": i,
                    "name": format!("User{}", i),
                    "score": i
                })).collect::<Vec<_>>()
            });
            let right = json!({
                "users": (10..110).map(|i| json!({
                    "id": i,
                    "name": format!("User{}", i),
                    "score": if i % 10 == 0 { i + 1 } else { i }
                })).collect::<Vec<_>>()
            });
            (left, right)
        }

        "positional_scalars" => {
            let left = json!({"items": (0..1000).collect::<Vec<_>>()});
            let right = json!({"items": (0..1005).map(|i| if i == 500 { -1 } else { i }).collect::<Vec<_>>()});
            (left, right)
        }

        "deep_nested_change" => {
            let mut left = json!({"value": "original"});
            let mut right = json!({"value": "modified"});
            for level in (1..=10).rev() {
                let mut wrap = serde_json::Map::new();
                wrap.insert(format!("level{}", level), left);
                left = Value::Object(wrap);
                let mut wrap = serde_json::Map::new();
                wrap.insert(format!("level{}", level), right);
                right = Value::Object(wrap);
            }
            (left, right)
        }

        "wide_object" => {
            let left: Value = (0..500)
                .map(|i| (format!("field{}", i), json!(i)))
                .collect::<serde_json::Map<_, _>>()
                .into();
            let right: Value = (0..500)
                .map(|i| (format!("field{}", i), json!(if i % 50 == 0 { i + 1 } else { i })))
                .collect::<serde_json::Map<_, _>>()
                .into();
            (left, right)
        }

        _ => panic!("unknown scenario: {}", scenario),
    }
}

fn bench_diff_scenarios(c: &mut Criterion) {
    let scenarios = [
        "identical_small",
        "identical_keyed_rows",
        "keyed_rows_drift",
        "positional_scalars",
        "deep_nested_change",
        "wide_object",
    ];

    let mut group = c.benchmark_group("diff_scenarios");
    for scenario in scenarios {
        let (left, right) = generate_pairs(scenario);
        let bytes = serde_json::to_vec(&left).unwrap().len() as u64;
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(
            BenchmarkId::from_parameter(scenario),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| {
                    let entries =
                        diff_values(black_box(left), black_box(right), &DiffOptions::new())
                            .unwrap();
                    black_box(entries)
                });
            },
        );
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let (doc, _) = generate_pairs("identical_keyed_rows");
    c.bench_function("normalize_keyed_rows", |b| {
        b.iter(|| black_box(normalize(black_box(&doc)).unwrap()));
    });
}

fn bench_prenormalized_diff(c: &mut Criterion) {
    // Separates tree construction cost from the walk itself.
    let (left, right) = generate_pairs("keyed_rows_drift");
    let left = normalize(&left).unwrap();
    let right = normalize(&right).unwrap();
    let options = DiffOptions::new()
        .with_join_key("$.users", ["id"].into_iter().collect::<JoinKeySpec>());
    c.bench_function("diff_prenormalized_keyed", |b| {
        b.iter(|| black_box(diff(black_box(&left), black_box(&right), &options).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_diff_scenarios,
    bench_normalize,
    bench_prenormalized_diff
);
criterion_main!(benches);
