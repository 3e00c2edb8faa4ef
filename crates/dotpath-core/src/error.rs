// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for dotpath operations

use thiserror::Error;

/// Errors raised while parsing paths, writing into nested values, or flattening them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DotpathError {
    /// The path string is empty or contains an empty segment
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path string
        path: String,
        /// Why the path was rejected
        reason: &'static str,
    },

    /// An existing node along the path is not the container kind required
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Path prefix up to and including the mismatching node
        path: String,
        /// Kind the writer needed at this position
        expected: &'static str,
        /// Kind actually present
        found: &'static str,
    },

    /// A list index exceeds the configured ceiling
    #[error("index {index} at '{path}' exceeds maximum list index {max}")]
    IndexTooLarge {
        /// Path prefix up to and including the index segment
        path: String,
        /// Requested index
        index: usize,
        /// Configured ceiling
        max: usize,
    },

    /// Flattening descended past the configured depth limit
    #[error("maximum nesting depth {max_depth} exceeded")]
    DepthExceeded {
        /// Configured depth limit
        max_depth: usize,
    },

    /// A flat map was required but the input was some other JSON value
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// Kind actually present
        found: &'static str,
    },

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DotpathError {
    /// Shorthand for an [`DotpathError::InvalidPath`]
    #[must_use]
    pub fn invalid_path(path: &str, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.to_owned(),
            reason,
        }
    }
}

/// Result type for dotpath operations
pub type Result<T> = std::result::Result<T, DotpathError>;
