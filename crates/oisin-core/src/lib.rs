// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and the comparison tree for oisin
//!
//! This crate provides the foundational types used across the oisin crates:
//!
//! - [`error`] - Error taxonomy and Result alias
//! - [`node`] - The comparison tree and the normalizer
//! - [`path`] - Diff path segments and rendering
//!
//! The comparison tree is immutable once built: [`node::normalize`] is a
//! pure function and the differ in `oisin-diff` only reads the trees it is
//! given, so concurrent comparisons over shared trees need no locking.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

/// Error types for comparison operations
pub mod error;
/// Comparison tree and normalizer
pub mod node;
/// Diff path types
pub mod path;

pub use error::{CompareError, Result};
pub use node::{ComparisonNode, LeafValue, NodeKind, Number, normalize};
pub use path::{DiffPath, PathSegment};
