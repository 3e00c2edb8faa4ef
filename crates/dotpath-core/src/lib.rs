// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and path parsing for dotpath
//!
//! This crate provides the foundational types used across the dotpath crates:
//!
//! - [`error`] - Error types and Result alias
//! - [`path`] - Dotted path parsing and segment classification
//! - [`value`] - Node kinds and leaf truthiness over `serde_json::Value`

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Error types for dotpath operations
pub mod error;
/// Dotted path parsing
pub mod path;
/// Node classification helpers
pub mod value;

// Re-exports for convenience
pub use error::{DotpathError, Result};
pub use path::{DotPath, SEPARATOR, Segment, is_index};
pub use value::{FlatMap, NodeKind, is_truthy, kind_of};
