// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for oisin operations.
//!
//! Every failure in the comparison core is deterministic: the same inputs
//! always produce the same error. Nothing here is retryable.

use thiserror::Error;

/// Errors produced while normalizing inputs or computing a diff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// The input is not a canonicalizable JSON value (for example a
    /// non-finite number smuggled through a lenient parser).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A join-key specification references a location that is not an array
    /// of objects in at least one of the two documents.
    #[error("join key configuration for `{path}`: {reason}")]
    Configuration {
        /// Canonical config path of the offending array location.
        path: String,
        /// Why the specification cannot be applied there.
        reason: String,
    },
}

/// Result alias used across the oisin crates.
pub type Result<T> = std::result::Result<T, CompareError>;
