// SPDX-License-Identifier: MIT OR Apache-2.0
//! # oisin-cli
//!
//! Command-line interface for oisin - structural comparison of JSON
//! documents from files or live APIs.
//!
//! ## Usage
//!
//! ```bash
//! # Compare two files
//! oisin compare left.json right.json
//!
//! # Compare two API responses, aligning the users array by id
//! oisin compare https://a.example.com/users https://b.example.com/users \
//!     --join-key '$=id'
//!
//! # Export the differences as CSV, hiding volatile keys
//! oisin compare left.json right.json --format csv \
//!     --exclude-key updated_at --exclude-key run_id
//!
//! # Ask which keys look volatile before excluding anything
//! oisin compare left.json right.json --suggest-exclusions
//!
//! # See which join keys could be pinned
//! oisin infer-keys left.json right.json
//!
//! # Pretty-print or compact a document
//! oisin format data.json
//! oisin format -c data.json
//! ```
//!
//! ## Library Usage
//!
//! This crate is primarily a CLI tool. For programmatic access use the
//! constituent library crates directly:
//!
//! - [`oisin-diff`](https://docs.rs/oisin-diff) - comparison engine
//! - [`oisin-core`](https://docs.rs/oisin-core) - comparison tree and paths

#![warn(missing_docs)]

/// Join-key discovery report across two documents.
pub mod keys;
/// Output rendering (JSON, CSV) for diff results.
pub mod render;
/// Document sources: files and HTTP endpoints.
pub mod source;

/// Re-export of oisin-diff for diff functionality.
pub use oisin_diff as diff;

/// Re-export of oisin-core for core types.
pub use oisin_core as core;
